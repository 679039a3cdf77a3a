//! Réglages du grapheur (grapheur.toml).
//!
//! ```toml
//! [rendu]
//! largeur = 800
//! hauteur = 600
//!
//! [artefact]
//! chemin = "sortie/plot.png"
//! ecrire = true
//!
//! [formulaire]
//! fonction = "heaviside(t) - heaviside(t - 0.5)"
//! intervalle = "1"
//! repetitions = "4"
//! ```
//!
//! Toutes les sections sont optionnelles. Fichier absent => valeurs par défaut ;
//! fichier illisible ou invalide => avertissement + valeurs par défaut.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::noyau::ReglagesRendu;

/// Variable d’environnement qui remplace le chemin par défaut.
pub const VAR_CHEMIN: &str = "GRAPHEUR_CONFIG";
pub const FICHIER_DEFAUT: &str = "grapheur.toml";
pub const ARTEFACT_DEFAUT: &str = "plot.png";

const fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Reglages {
    pub rendu: Option<SectionRendu>,
    pub artefact: Option<SectionArtefact>,
    pub formulaire: Option<SectionFormulaire>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionRendu {
    pub largeur: Option<u32>,
    pub hauteur: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionArtefact {
    pub chemin: Option<PathBuf>,
    /// false => l’image reste en mémoire (affichée seulement).
    #[serde(default = "default_true")]
    pub ecrire: bool,
}

/// Valeurs initiales des trois champs du formulaire.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionFormulaire {
    #[serde(default)]
    pub fonction: String,
    #[serde(default)]
    pub intervalle: String,
    #[serde(default)]
    pub repetitions: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ErreurReglages {
    #[error("lecture de {chemin} impossible: {source}")]
    Lecture {
        chemin: PathBuf,
        source: std::io::Error,
    },
    #[error("{chemin} invalide: {source}")]
    Analyse {
        chemin: PathBuf,
        source: toml::de::Error,
    },
}

impl Reglages {
    /// Chemin du fichier : `$GRAPHEUR_CONFIG`, sinon `grapheur.toml` (répertoire courant).
    pub fn chemin() -> PathBuf {
        match std::env::var_os(VAR_CHEMIN) {
            Some(p) if !p.is_empty() => PathBuf::from(p),
            _ => PathBuf::from(FICHIER_DEFAUT),
        }
    }

    /// Charge les réglages sans jamais échouer (défauts en cas de problème).
    pub fn charger() -> Self {
        let chemin = Self::chemin();
        match Self::depuis_fichier(&chemin) {
            Ok(Some(r)) => {
                tracing::info!(chemin = %chemin.display(), "réglages chargés");
                r
            }
            Ok(None) => {
                tracing::debug!(chemin = %chemin.display(), "pas de fichier de réglages");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(erreur = %e, "réglages ignorés, valeurs par défaut");
                Self::default()
            }
        }
    }

    /// `Ok(None)` si le fichier n’existe pas.
    pub fn depuis_fichier(chemin: &Path) -> Result<Option<Self>, ErreurReglages> {
        if !chemin.exists() {
            return Ok(None);
        }

        let contenu = std::fs::read_to_string(chemin).map_err(|source| ErreurReglages::Lecture {
            chemin: chemin.to_path_buf(),
            source,
        })?;

        toml::from_str(&contenu)
            .map(Some)
            .map_err(|source| ErreurReglages::Analyse {
                chemin: chemin.to_path_buf(),
                source,
            })
    }

    /// Dimensions d’image, bornées.
    pub fn rendu(&self) -> ReglagesRendu {
        let defaut = ReglagesRendu::default();
        let section = self.rendu.clone().unwrap_or_default();
        ReglagesRendu::bornees(
            section.largeur.unwrap_or(defaut.largeur),
            section.hauteur.unwrap_or(defaut.hauteur),
        )
    }

    /// Où écrire le PNG ; `None` si l’écriture est désactivée.
    pub fn chemin_artefact(&self) -> Option<PathBuf> {
        match &self.artefact {
            None => Some(PathBuf::from(ARTEFACT_DEFAUT)),
            Some(a) if !a.ecrire => None,
            Some(a) => Some(a.chemin.clone().unwrap_or_else(|| PathBuf::from(ARTEFACT_DEFAUT))),
        }
    }

    pub fn formulaire(&self) -> SectionFormulaire {
        self.formulaire.clone().unwrap_or_default()
    }
}
