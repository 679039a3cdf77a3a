//! Superposition périodique : Σ_{i=0..n} f(t − i·h) · H(t − i·h)
//!
//! - grille uniforme de `NB_ECHANTILLONS` points sur [0, h·n] (bornes incluses)
//! - copies évaluées dans l’ordre i = 0, 1, …, n
//! - porte de Heaviside appliquée AVANT l’addition (rien avant le départ d’une copie)
//!
//! La grille étant croissante, la porte d’une copie retient un suffixe de la grille :
//! ce suffixe est évalué en une seule passe (programme par lot) puis ajouté d’un bloc.

use tracing::debug;

use super::erreurs::ErreurTrace;
use super::expression::Expression;

/// Taille fixe de la grille d’échantillonnage.
pub const NB_ECHANTILLONS: usize = 1000;

/// Garde-fou : borne le nombre de répétitions (anti-gel).
pub const REPETITIONS_MAX: u32 = 10_000;

/// Intervalle h et nombre de répétitions n, déjà contrôlés.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Periodicite {
    h: f64,
    n: u32,
}

impl Periodicite {
    /// Contrôle numérique : h fini et ≥ 0, n ≤ REPETITIONS_MAX, h·n fini.
    pub fn nouvelle(h: f64, n: u32) -> Result<Self, ErreurTrace> {
        if !h.is_finite() || h < 0.0 {
            return Err(ErreurTrace::numerique(format!(
                "intervalle hors domaine: {h}"
            )));
        }
        if n > REPETITIONS_MAX {
            return Err(ErreurTrace::numerique(format!(
                "trop de répétitions: {n} (max {REPETITIONS_MAX})"
            )));
        }
        if !(h * f64::from(n)).is_finite() {
            return Err(ErreurTrace::numerique("durée totale h·n non finie"));
        }
        Ok(Self { h, n })
    }

    /// Lecture des deux champs texte (espaces tolérés, signe + accepté).
    /// Les deux sont lus AVANT toute validation de l’expression.
    pub fn depuis_textes(intervalle: &str, repetitions: &str) -> Result<Self, ErreurTrace> {
        let h = intervalle
            .trim()
            .parse::<f64>()
            .map_err(|_| ErreurTrace::numerique(format!("intervalle illisible: {intervalle:?}")))?;
        let n = repetitions
            .trim()
            .parse::<i64>()
            .map_err(|_| {
                ErreurTrace::numerique(format!("répétitions illisibles: {repetitions:?}"))
            })?;
        let n = u32::try_from(n)
            .map_err(|_| ErreurTrace::numerique(format!("répétitions hors domaine: {n}")))?;

        Self::nouvelle(h, n)
    }

    pub fn intervalle(&self) -> f64 {
        self.h
    }

    pub fn repetitions(&self) -> u32 {
        self.n
    }

    /// Fin de la grille : h·n.
    pub fn duree(&self) -> f64 {
        self.h * f64::from(self.n)
    }
}

/// Série (t, valeur) produite par une évaluation ; immuable.
#[derive(Clone, Debug, PartialEq)]
pub struct SerieEchantillons {
    t: Vec<f64>,
    valeurs: Vec<f64>,
}

impl SerieEchantillons {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn temps(&self) -> &[f64] {
        &self.t
    }

    pub fn valeurs(&self) -> &[f64] {
        &self.valeurs
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t.iter().copied().zip(self.valeurs.iter().copied())
    }

    /// (min, max) des valeurs ; None si la série est vide.
    pub fn bornes_valeurs(&self) -> Option<(f64, f64)> {
        let mut it = self.valeurs.iter().copied();
        let premier = it.next()?;
        Some(it.fold((premier, premier), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// `nb` points uniformément espacés sur [debut, fin], dernier point exactement `fin`.
pub fn linspace(debut: f64, fin: f64, nb: usize) -> Vec<f64> {
    match nb {
        0 => Vec::new(),
        1 => vec![debut],
        _ => {
            let pas = (fin - debut) / (nb - 1) as f64;
            let mut out: Vec<f64> = (0..nb).map(|k| debut + k as f64 * pas).collect();
            out[nb - 1] = fin;
            out
        }
    }
}

/// Évalue la superposition des n+1 copies décalées de `expression`.
pub fn evaluer(
    expression: &Expression,
    periodicite: Periodicite,
) -> Result<SerieEchantillons, ErreurTrace> {
    let h = periodicite.intervalle();
    let n = periodicite.repetitions();

    let t = linspace(0.0, periodicite.duree(), NB_ECHANTILLONS);
    let programme = expression.compiler();
    let mut sortie = vec![0.0f64; t.len()];

    for i in 0..=n {
        let decalage = f64::from(i) * h;

        // porte : t − i·h ≥ 0  <=>  indice ≥ debut
        let debut = t.partition_point(|&tk| tk - decalage < 0.0);
        if debut == t.len() {
            continue;
        }

        let decale: Vec<f64> = t[debut..].iter().map(|&tk| tk - decalage).collect();
        let copie = programme.evaluer_lot(&decale);

        if let Some(k) = copie.iter().position(|v| !v.is_finite()) {
            return Err(ErreurTrace::Evaluation {
                t: decale[k],
                detail: format!("valeur non finie pour la copie {i}"),
            });
        }

        sortie[debut..]
            .iter_mut()
            .zip(&copie)
            .for_each(|(acc, v)| *acc += v);
    }

    if let Some(k) = sortie.iter().position(|v| !v.is_finite()) {
        return Err(ErreurTrace::Evaluation {
            t: t[k],
            detail: "somme des copies non finie".into(),
        });
    }

    debug!(
        h,
        n,
        copies = n + 1,
        points = t.len(),
        "superposition évaluée"
    );

    Ok(SerieEchantillons { t, valeurs: sortie })
}
