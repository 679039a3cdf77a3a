// src/noyau/erreurs.rs
//
// Erreurs du noyau (toutes récupérables).
// - Display = message montré tel quel à l’utilisateur
// - `detail` = contexte pour les journaux / la démarche (jamais affiché seul)

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurTrace {
    /// Intervalle ou nombre de répétitions non numérique (ou hors bornes).
    #[error("Please enter valid numeric values for interval and number.")]
    EntreeNumerique { detail: String },

    /// Texte de fonction vide (ou seulement des espaces).
    #[error("Function must be a non-empty string")]
    EntreeInvalide,

    /// Texte non reconnu comme expression en t.
    #[error("Invalid expression. Use standard syntax.")]
    ExpressionInvalide { detail: String },

    /// Valeur non finie sur un point retenu par la porte de Heaviside.
    #[error("The function cannot be evaluated at t = {t} ({detail}).")]
    Evaluation { t: f64, detail: String },

    /// Échec du tracé ou de l’encodage PNG.
    #[error("The plot could not be rendered: {detail}")]
    Rendu { detail: String },

    /// Échec d’écriture de l’artefact sur disque.
    #[error("The plot could not be written to {}: {detail}", chemin.display())]
    EcritureArtefact { chemin: PathBuf, detail: String },
}

impl ErreurTrace {
    pub(crate) fn numerique(detail: impl Into<String>) -> Self {
        Self::EntreeNumerique {
            detail: detail.into(),
        }
    }

    pub(crate) fn syntaxe(detail: impl Into<String>) -> Self {
        Self::ExpressionInvalide {
            detail: detail.into(),
        }
    }

    pub(crate) fn rendu(detail: impl std::fmt::Display) -> Self {
        Self::Rendu {
            detail: detail.to_string(),
        }
    }

    /// Nom court de la catégorie (champ `kind` des événements tracing).
    pub fn categorie(&self) -> &'static str {
        match self {
            Self::EntreeNumerique { .. } => "entree_numerique",
            Self::EntreeInvalide => "entree_invalide",
            Self::ExpressionInvalide { .. } => "expression_invalide",
            Self::Evaluation { .. } => "evaluation",
            Self::Rendu { .. } => "rendu",
            Self::EcritureArtefact { .. } => "ecriture_artefact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ErreurTrace;

    #[test]
    fn messages_utilisateur_exacts() {
        assert_eq!(
            ErreurTrace::numerique("x").to_string(),
            "Please enter valid numeric values for interval and number."
        );
        assert_eq!(
            ErreurTrace::EntreeInvalide.to_string(),
            "Function must be a non-empty string"
        );
        assert_eq!(
            ErreurTrace::syntaxe("parenthèses non fermées").to_string(),
            "Invalid expression. Use standard syntax."
        );
    }

    #[test]
    fn evaluation_mentionne_t() {
        let e = ErreurTrace::Evaluation {
            t: 0.0,
            detail: "valeur non finie".into(),
        };
        assert!(e.to_string().contains("t = 0"));
        assert_eq!(e.categorie(), "evaluation");
    }
}
