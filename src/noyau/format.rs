// src/noyau/format.rs
//
// Affichage “joli” d’une Expr (démarche) : parenthèses minimales selon les précédences.

use super::expr::Expr;

/* ------------------------ Précédences d’affichage ------------------------ */

const P_ADD: u8 = 1;
const P_MUL: u8 = 2;
const P_NEG: u8 = 3;
const P_POW: u8 = 4;
const P_ATOME: u8 = 5;

fn precedence(e: &Expr) -> u8 {
    use Expr::*;

    match e {
        Add(..) | Sub(..) => P_ADD,
        Mul(..) | Div(..) => P_MUL,
        Neg(_) => P_NEG,
        Pow(..) => P_POW,
        Const(_) | Pi | E | Var | Appel(..) => P_ATOME,
    }
}

/// Entoure `e` de parenthèses si sa précédence est < `min`
/// (toujours pour une constante négative : elle se lit comme un moins unaire).
fn sous_expr(e: &Expr, min: u8) -> String {
    let s = format_expr_pretty(e);
    let const_negative = matches!(e, Expr::Const(v) if v.is_sign_negative());
    if const_negative || precedence(e) < min {
        format!("({s})")
    } else {
        s
    }
}

/// Constante : entier sans ".0", sinon représentation f64 la plus courte.
fn format_const(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "∞" } else { "-∞" }.to_string()
    } else {
        format!("{v}")
    }
}

/// Expr -> texte lisible, ex: `-(t - 1)^2 + sin(π*t)`.
pub fn format_expr_pretty(e: &Expr) -> String {
    use Expr::*;

    match e {
        Const(v) => format_const(*v),
        Pi => "π".to_string(),
        E => "e".to_string(),
        Var => "t".to_string(),

        Neg(a) => format!("-{}", sous_expr(a, P_NEG)),
        Appel(f, a) => format!("{}({})", f.nom(), format_expr_pretty(a)),

        // membre droit : précédence strictement plus forte (a - (b - c), et en f64
        // a + (b + c) != (a + b) + c, donc l’arbre relu doit rester le même)
        Add(a, b) => format!("{} + {}", sous_expr(a, P_ADD), sous_expr(b, P_ADD + 1)),
        Sub(a, b) => format!("{} - {}", sous_expr(a, P_ADD), sous_expr(b, P_ADD + 1)),
        Mul(a, b) => format!("{}*{}", sous_expr(a, P_MUL), sous_expr(b, P_MUL + 1)),
        Div(a, b) => format!("{}/{}", sous_expr(a, P_MUL), sous_expr(b, P_MUL + 1)),
        // ^ associatif à droite : la base doit être un atome
        Pow(a, b) => format!("{}^{}", sous_expr(a, P_ATOME), sous_expr(b, P_POW)),
    }
}
