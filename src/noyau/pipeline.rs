//! Noyau: pipeline complet (trois champs texte -> trace ou erreur)
//!
//! intervalle + répétitions -> Periodicite (AVANT l’expression)
//!        -> Expression (validation) -> superposition -> rendu PNG
//!
//! Aucun effet de bord : l’artefact est rendu à l’appelant, qui décide de l’écrire.

use tracing::{info, warn};

use super::erreurs::ErreurTrace;
use super::expression::{Demarche, Expression};
use super::rendu::{rendre, ArtefactTrace, ReglagesRendu};
use super::superposition::{evaluer, Periodicite, SerieEchantillons};

/// Résultat d’un tracé réussi.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    pub serie: SerieEchantillons,
    pub artefact: ArtefactTrace,
    pub demarche: Demarche,
}

/// API publique : trace `fonction` répétée `repetitions` fois tous les `intervalle`.
pub fn tracer(
    fonction: &str,
    intervalle: &str,
    repetitions: &str,
    reglages: &ReglagesRendu,
) -> Result<Trace, ErreurTrace> {
    let resultat = tracer_sans_journal(fonction, intervalle, repetitions, reglages);

    match &resultat {
        Ok(trace) => info!(
            fonction,
            points = trace.serie.len(),
            octets_png = trace.artefact.png().len(),
            "tracé produit"
        ),
        Err(e) => warn!(fonction, kind = e.categorie(), erreur = ?e, "tracé refusé"),
    }

    resultat
}

fn tracer_sans_journal(
    fonction: &str,
    intervalle: &str,
    repetitions: &str,
    reglages: &ReglagesRendu,
) -> Result<Trace, ErreurTrace> {
    // 1) Champs numériques d’abord : l’expression n’est même pas regardée s’ils sont faux
    let periodicite = Periodicite::depuis_textes(intervalle, repetitions)?;

    // 2) Validation de l’expression
    let expression = Expression::nouvelle(fonction)?;

    // 3) Superposition des copies décalées
    let serie = evaluer(&expression, periodicite)?;

    // 4) Rendu
    let artefact = rendre(&serie, reglages)?;

    Ok(Trace {
        serie,
        artefact,
        demarche: expression.demarche(),
    })
}
