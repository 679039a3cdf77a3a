// src/noyau/expression.rs
//
// Validateur : texte brut -> Expression (immuable) ou erreur.
//
// Contrats :
// - Texte vide / espaces seulement => EntreeInvalide, SANS tentative d’analyse.
// - Tout échec d’analyse (jetons, RPN, arbre) => ExpressionInvalide (détail conservé).
// - Arbre plus profond que PROFONDEUR_MAX => ExpressionInvalide, AVANT construction
//   (évaluation, repli et affichage sont récursifs : anti-débordement de pile).
// - Une fois construite, une Expression ne change plus : “changer le texte”
//   = construire une nouvelle Expression (with_source).

use tracing::debug;

use super::erreurs::ErreurTrace;
use super::expr::Expr;
use super::format::format_expr_pretty;
use super::jetons::{format_tokens, tokenize, Tok};
use super::programme::Programme;
use super::rpn::{from_rpn, profondeur_rpn, to_rpn};

/// Profondeur d’arbre maximale acceptée (garde-fou anti-pile).
pub const PROFONDEUR_MAX: usize = 500;

/// Étapes intermédiaires, affichées dans le panneau “Démarche”.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub avant: String,
    pub apres: String,
    pub note: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    source: String,
    jetons: Vec<Tok>,
    rpn: Vec<Tok>,
    arbre: Expr,
}

impl Expression {
    /// Valide `texte` et construit l’expression analysée.
    pub fn nouvelle(texte: &str) -> Result<Self, ErreurTrace> {
        let s = texte.trim();
        if s.is_empty() {
            return Err(ErreurTrace::EntreeInvalide);
        }

        let jetons = tokenize(s).map_err(ErreurTrace::syntaxe)?;
        let rpn = to_rpn(&jetons).map_err(ErreurTrace::syntaxe)?;

        let profondeur = profondeur_rpn(&rpn);
        if profondeur > PROFONDEUR_MAX {
            return Err(ErreurTrace::syntaxe(format!(
                "expression trop imbriquée: {profondeur} niveaux (max {PROFONDEUR_MAX})"
            )));
        }
        let arbre = from_rpn(&rpn).map_err(ErreurTrace::syntaxe)?;

        debug!(
            source = s,
            jetons = jetons.len(),
            noeuds = arbre.taille(),
            "expression validée"
        );

        Ok(Self {
            source: texte.to_string(),
            jetons,
            rpn,
            arbre,
        })
    }

    /// Nouvelle expression à partir d’un autre texte (revalidation complète).
    /// `self` reste intact, même en cas d’erreur.
    pub fn with_source(&self, texte: &str) -> Result<Self, ErreurTrace> {
        Self::nouvelle(texte)
    }

    /// Texte d’origine, tel que saisi.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn arbre(&self) -> &Expr {
        &self.arbre
    }

    /// Évaluateur numérique rapide (constantes repliées, évaluation par lot).
    pub fn compiler(&self) -> Programme {
        Programme::compiler(&self.arbre)
    }

    pub fn demarche(&self) -> Demarche {
        Demarche {
            jetons: format_tokens(&self.jetons),
            rpn: format_tokens(&self.rpn),
            avant: format_expr_pretty(&self.arbre),
            apres: format_expr_pretty(&self.arbre.clone().simplify()),
            note: "Pipeline: jetons → RPN → Expr → repli des constantes → programme → Σ copies décalées.".into(),
        }
    }
}
