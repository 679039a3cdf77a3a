// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - fonction connue => opérateur unaire préfixe, DOIT être suivi de '('
//    - "t" => variable ; "e" => constante d’Euler
//    - sinon => symbole inconnu (refusé)
// - Moins unaire => Tok::Neg (préfixe), plus lié que * mais moins que ^ : -t^2 = -(t^2)
// - Plus unaire => ignoré
// - Deux valeurs consécutives (ex: "2t", "t(1)") => refusé (pas de multiplication implicite)

use super::expr::{Expr, Fonction, VARIABLE};
use super::jetons::Tok;

/// Nom de la constante d’Euler (après passage en minuscules).
const CONSTANTE_E: &str = "e";

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_fonction(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if Fonction::depuis_nom(name).is_some())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Ident("t"), Slash, Num(2), RPar]
///   rpn:    [Ident("t"), Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, String> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // Au départ (et après un opérateur ou '(') on attend une valeur.
    let mut attend_valeur = true;

    for (idx, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Pi => {
                if !attend_valeur {
                    return Err("multiplication implicite non supportée".into());
                }
                out.push(tok);
                attend_valeur = false;
            }

            Tok::Ident(name) => {
                if !attend_valeur {
                    return Err("multiplication implicite non supportée".into());
                }

                if Fonction::depuis_nom(&name).is_some() {
                    // fonction : elle sortira après la parenthèse fermante de son argument
                    if tokens.get(idx + 1) != Some(&Tok::LPar) {
                        return Err(format!("fonction sans parenthèses: {name}"));
                    }
                    ops.push(Tok::Ident(name));
                } else if name == VARIABLE || name == CONSTANTE_E {
                    out.push(Tok::Ident(name));
                    attend_valeur = false;
                } else {
                    return Err(format!("symbole inconnu: {name}"));
                }
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err("multiplication implicite non supportée".into());
                }
                ops.push(tok);
            }

            Tok::RPar => {
                if attend_valeur {
                    return Err("parenthèse fermante inattendue".into());
                }

                // dépile jusqu’à '('
                let mut ouvrante = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante {
                    return Err("parenthèse fermante sans ouvrante".into());
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(is_fonction) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }
            }

            Tok::Plus | Tok::Minus if attend_valeur => {
                // unaire : le plus ne change rien, le moins devient Neg (préfixe, sans dépiler)
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if attend_valeur {
                    return Err(format!("opérateur inattendu: {}", symbole(&tok)));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || is_fonction(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                attend_valeur = true;
            }

            Tok::Neg => return Err("jeton interne inattendu".into()),
        }
    }

    if attend_valeur {
        return Err("expression incomplète".into());
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err("parenthèses non fermées".into());
        }
        out.push(op);
    }

    Ok(out)
}

/// Profondeur de l’arbre que construirait `from_rpn` (feuille = 1).
/// Itératif : l’arbre n’est pas construit, une RPN très longue ne coûte rien en pile.
pub fn profondeur_rpn(rpn: &[Tok]) -> usize {
    let mut pile: Vec<usize> = Vec::new();
    let mut max = 0;

    for tok in rpn {
        let p = match tok {
            Tok::Neg => pile.pop().unwrap_or(0) + 1,
            Tok::Ident(name) if Fonction::depuis_nom(name).is_some() => pile.pop().unwrap_or(0) + 1,
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = pile.pop().unwrap_or(0);
                let a = pile.pop().unwrap_or(0);
                a.max(b) + 1
            }
            _ => 1,
        };
        max = max.max(p);
        pile.push(p);
    }

    max
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, String> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Const(v)),
            Tok::Pi => st.push(Expr::Pi),

            Tok::Neg => {
                let x = st.pop().ok_or("expression invalide")?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(st.pop().ok_or("expression invalide")?);
                let a = Box::new(st.pop().ok_or("expression invalide")?);

                st.push(match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                });
            }

            Tok::Ident(name) => {
                if let Some(f) = Fonction::depuis_nom(&name) {
                    let x = st.pop().ok_or("fonction sans argument")?;
                    st.push(Expr::Appel(f, Box::new(x)));
                } else if name == VARIABLE {
                    st.push(Expr::Var);
                } else if name == CONSTANTE_E {
                    st.push(Expr::E);
                } else {
                    return Err(format!("symbole inconnu: {name}"));
                }
            }

            Tok::LPar | Tok::RPar => return Err("parenthèse inattendue en RPN".into()),
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err("expression invalide".into()),
    }
}

fn symbole(t: &Tok) -> &'static str {
    match t {
        Tok::Plus => "+",
        Tok::Minus => "-",
        Tok::Star => "*",
        Tok::Slash => "/",
        Tok::Caret => "^",
        _ => "?",
    }
}
