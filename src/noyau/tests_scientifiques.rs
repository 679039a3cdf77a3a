//! Tests scientifiques (campagne) : propriétés de la superposition + limites contrôlées.
//!
//! - champs numériques faux => erreur numérique, expression jamais regardée
//! - texte vide / blanc => entrée invalide ; syntaxe fausse => expression invalide
//! - constante c : n = 0 => c partout ; h = 1, n = 2 => c, 2c, 3c selon la zone
//! - idempotence : mêmes entrées => série identique au bit près + PNG identique
//! - grille : 1000 points, 0 et h·n inclus, quels que soient h et n

use std::time::{Duration, Instant};

use super::erreurs::ErreurTrace;
use super::expression::Expression;
use super::rendu::ReglagesRendu;
use super::superposition::{evaluer, Periodicite, SerieEchantillons, NB_ECHANTILLONS};
use super::tracer;

fn serie_ok(f: &str, h: f64, n: u32) -> SerieEchantillons {
    let e = Expression::nouvelle(f).unwrap_or_else(|err| panic!("f={f:?} err={err}"));
    let p = Periodicite::nouvelle(h, n).unwrap_or_else(|err| panic!("h={h} n={n} err={err}"));
    evaluer(&e, p).unwrap_or_else(|err| panic!("f={f:?} h={h} n={n} err={err}"))
}

/// Toutes les valeurs dont le temps est dans [a, b] valent `attendu`.
fn assert_zone(s: &SerieEchantillons, a: f64, b: f64, attendu: f64) {
    let mut vus = 0;
    for (t, v) in s.points().filter(|(t, _)| *t >= a && *t <= b) {
        assert_eq!(v, attendu, "t={t}");
        vus += 1;
    }
    assert!(vus > 0, "aucun point dans [{a}, {b}]");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Entrées refusées ------------------------ */

#[test]
fn sci_numerique_non_lisible() {
    let r = ReglagesRendu::default();
    for (h, n) in [("x", "2"), ("1", "y"), ("", ""), ("1,5", "2"), ("1", "2.0"), ("nan", "2")] {
        // l’expression est volontairement invalide : elle ne doit pas être atteinte
        match tracer("(((", h, n, &r) {
            Err(ErreurTrace::EntreeNumerique { .. }) => {}
            autre => panic!("h={h:?} n={n:?} : {autre:?}"),
        }
    }
}

#[test]
fn sci_texte_vide() {
    for s in ["", " ", "\n\t  "] {
        assert_eq!(Expression::nouvelle(s), Err(ErreurTrace::EntreeInvalide));
    }
}

#[test]
fn sci_syntaxe_invalide() {
    for s in ["(t", "t)", "t +", "*t", "2t", "sin", "sin()", "t ^ ^ 2", "t & 1", "y*t"] {
        assert!(
            matches!(
                Expression::nouvelle(s),
                Err(ErreurTrace::ExpressionInvalide { .. })
            ),
            "s={s:?}"
        );
    }
}

/* ------------------------ Constantes ------------------------ */

#[test]
fn sci_constante_sans_repetition() {
    for c in [-2.5, 0.0, 1.0, 7.0] {
        let s = serie_ok(&format!("{c}"), 3.0, 0);
        assert!(s.valeurs().iter().all(|&v| v == c), "c={c}");
    }
}

#[test]
fn sci_constante_escaliers() {
    // h = 1, n = 2 : [0,1[ -> c ; [1,2[ -> 2c ; t = 2 -> 3c
    let c = 4.0;
    let s = serie_ok("4", 1.0, 2);

    assert_zone(&s, 0.4, 0.6, c);
    assert_zone(&s, 1.4, 1.6, 2.0 * c);
    assert_zone(&s, 2.0, 2.0, 3.0 * c);

    // palier exact juste avant chaque départ de copie
    assert_zone(&s, 0.0, 0.999, c);
    assert_zone(&s, 1.001, 1.999, 2.0 * c);
}

#[test]
fn sci_echelon_heaviside_retarde() {
    // f = heaviside(t - 0.5) : chaque copie démarre à i·h + 0.5
    let s = serie_ok("Heaviside(t - 0.5)", 1.0, 1);
    assert_zone(&s, 0.0, 0.49, 0.0);
    assert_zone(&s, 0.51, 1.0, 1.0);
}

/* ------------------------ Idempotence ------------------------ */

#[test]
fn sci_idempotence_bit_a_bit() {
    let r = ReglagesRendu::bornees(320, 240);
    let a = tracer("sin(2*pi*t) * exp(-t)", "0.75", "5", &r).unwrap();
    let b = tracer("sin(2*pi*t) * exp(-t)", "0.75", "5", &r).unwrap();

    let bits = |s: &SerieEchantillons| -> Vec<u64> {
        s.valeurs().iter().map(|v| v.to_bits()).collect()
    };
    assert_eq!(bits(&a.serie), bits(&b.serie));
    assert_eq!(a.serie.temps(), b.serie.temps());
    assert_eq!(a.artefact.png(), b.artefact.png());
}

/* ------------------------ Grille ------------------------ */

#[test]
fn sci_grille_invariante() {
    let start = Instant::now();
    let max = Duration::from_secs(10);

    for &(h, n) in &[(0.0, 0), (0.0, 5), (1.0, 0), (0.1, 3), (2.5, 7), (1e-9, 2), (1e6, 40)] {
        budget(start, max);

        let s = serie_ok("t", h, n);
        let t = s.temps();
        assert_eq!(t.len(), NB_ECHANTILLONS, "h={h} n={n}");
        assert_eq!(t[0], 0.0);
        assert_eq!(t[NB_ECHANTILLONS - 1], h * f64::from(n));
        assert!(t.windows(2).all(|w| w[0] <= w[1]), "grille non croissante");
    }
}

#[test]
fn sci_masque_equivaut_boucle_naive() {
    // Référence : double boucle explicite (copie par copie, point par point)
    let f = "t^2 - 3*t + sqrt(t)";
    let (h, n) = (0.37, 6u32);
    let s = serie_ok(f, h, n);

    let arbre = Expression::nouvelle(f).unwrap().arbre().clone().simplify();
    let mut attendu = vec![0.0f64; NB_ECHANTILLONS];
    for i in 0..=n {
        for (k, &t) in s.temps().iter().enumerate() {
            let decale = t - f64::from(i) * h;
            if decale >= 0.0 {
                attendu[k] += arbre.evaluer(decale);
            }
        }
    }

    for (k, (v, a)) in s.valeurs().iter().zip(&attendu).enumerate() {
        assert_eq!(v.to_bits(), a.to_bits(), "k={k}");
    }
}

#[test]
fn sci_repetitions_max_sous_budget() {
    let start = Instant::now();
    let s = serie_ok("sin(t)", 0.001, super::superposition::REPETITIONS_MAX);
    assert_eq!(s.len(), NB_ECHANTILLONS);
    budget(start, Duration::from_secs(20));
}
