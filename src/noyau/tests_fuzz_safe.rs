//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler validateur et superposition sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs attendues (valeur non finie pour l’évaluation, syntaxe pour les mutations)
//! - invariant clé : toute série produite a 1000 points finis

use std::time::{Duration, Instant};

use super::erreurs::ErreurTrace;
use super::expression::Expression;
use super::format::format_expr_pretty;
use super::rendu::ReglagesRendu;
use super::superposition::{evaluer, Periodicite, NB_ECHANTILLONS};
use super::tracer;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(5), rng.pick(100)),
        3 => format!("{}e-{}", 1 + rng.pick(9), rng.pick(3)),
        4 => "pi".to_string(),
        _ => "e".to_string(),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => "t".to_string(),
        2 => gen_nombre(rng),
        _ => format!("(t - {})", gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let fonctions = ["sin", "cos", "exp", "sqrt", "abs", "heaviside", "log", "tanh"];

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => format!("-{}", gen_expr(rng, depth - 1)),
        _ => {
            let f = fonctions[rng.pick(fonctions.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Mutation : insère / supprime / remplace un caractère.
fn muter(rng: &mut Rng, s: &str) -> String {
    let alphabet: Vec<char> = "t()+-*/^.e 0123456789xπ√$".chars().collect();
    let mut chars: Vec<char> = s.chars().collect();
    let pos = rng.pick(chars.len() as u32 + 1) as usize;
    let c = alphabet[rng.pick(alphabet.len() as u32) as usize];

    match rng.pick(3) {
        0 => chars.insert(pos, c),
        1 if pos < chars.len() => {
            chars.remove(pos);
        }
        _ if pos < chars.len() => chars[pos] = c,
        _ => chars.push(c),
    }
    chars.into_iter().collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_superposition_finie_ou_erreur_evaluation() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..120 {
        budget(t0, max);

        let f = gen_expr(&mut rng, 4);
        let h = f64::from(rng.pick(20)) / 4.0;
        let n = rng.pick(6);

        // expression générée => toujours syntaxiquement valide
        let e = Expression::nouvelle(&f).unwrap_or_else(|err| panic!("f={f:?} err={err}"));
        let p = Periodicite::nouvelle(h, n).unwrap();

        match evaluer(&e, p) {
            Ok(s) => {
                assert_eq!(s.len(), NB_ECHANTILLONS);
                assert!(s.valeurs().iter().all(|v| v.is_finite()), "f={f:?}");
                seen_ok += 1;
            }
            Err(ErreurTrace::Evaluation { t, .. }) => {
                assert!(t >= 0.0, "la porte laisse passer un t négatif: f={f:?} t={t}");
                seen_err += 1;
            }
            Err(autre) => panic!("erreur non attendue: f={f:?} err={autre:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

fn serie_en_bits(f: &str) -> Result<Vec<u64>, String> {
    let e = Expression::nouvelle(f).map_err(|err| err.to_string())?;
    let p = Periodicite::nouvelle(0.5, 3).map_err(|err| err.to_string())?;
    let s = evaluer(&e, p).map_err(|err| err.to_string())?;
    Ok(s.valeurs().iter().map(|v| v.to_bits()).collect())
}

#[test]
fn fuzz_safe_determinisme() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let tirage = |seed: u64| -> Vec<Result<Vec<u64>, String>> {
        let mut rng = Rng::new(seed);
        (0..40).map(|_| serie_en_bits(&gen_expr(&mut rng, 3))).collect()
    };

    let a = tirage(0xBADC0DE_u64);
    budget(t0, max);
    let b = tirage(0xBADC0DE_u64);
    budget(t0, max);

    assert_eq!(a, b);
}

#[test]
fn fuzz_safe_affichage_relisible() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..150 {
        budget(t0, max);

        let f = gen_expr(&mut rng, 4);
        let e = Expression::nouvelle(&f).unwrap();

        // la forme affichée doit se relire en un arbre de même valeur
        let joli = format_expr_pretty(e.arbre());
        let relu = Expression::nouvelle(&joli)
            .unwrap_or_else(|err| panic!("f={f:?} joli={joli:?} err={err}"));

        for t in [0.0, 0.3, 1.0, 2.5] {
            let (a, b) = (e.arbre().evaluer(t), relu.arbre().evaluer(t));
            assert!(
                a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan()),
                "f={f:?} joli={joli:?} t={t}: {a} != {b}"
            );
        }
    }
}

#[test]
fn fuzz_safe_mutations_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = Rng::new(0xFEED_u64);

    let mut refusees = 0usize;
    for _ in 0..400 {
        budget(t0, max);

        let base = gen_expr(&mut rng, 3);
        let mut s = muter(&mut rng, &base);
        if rng.coin() {
            s = muter(&mut rng, &s);
        }

        match Expression::nouvelle(&s) {
            Ok(e) => assert_eq!(e.source(), s),
            Err(ErreurTrace::ExpressionInvalide { .. }) => refusees += 1,
            Err(ErreurTrace::EntreeInvalide) => assert!(s.trim().is_empty(), "s={s:?}"),
            Err(autre) => panic!("erreur non attendue: s={s:?} err={autre:?}"),
        }
    }

    assert!(refusees > 0, "aucune mutation refusée: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_somme_longue_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 400 termes en chaîne gauche : profondeur d’arbre 401
    let f = vec!["t/400"; 400].join(" + ");
    let e = Expression::nouvelle(&f).unwrap_or_else(|err| panic!("err: {err}"));
    let s = evaluer(&e, Periodicite::nouvelle(1.0, 0).unwrap()).unwrap();
    budget(t0, max);

    // grille réduite à 0 : somme nulle
    assert!(s.valeurs().iter().all(|&v| v == 0.0));

    // 20 000 termes : refusé proprement (pas de débordement de pile)
    let f = vec!["t"; 20_000].join("+");
    assert!(matches!(
        tracer(&f, "1", "1", &ReglagesRendu::bornees(160, 160)),
        Err(ErreurTrace::ExpressionInvalide { .. })
    ));
    budget(t0, max);
}
