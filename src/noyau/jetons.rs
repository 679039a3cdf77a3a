// src/noyau/jetons.rs

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    // Fonctions, constantes nommées et variable.
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction (sin/exp/...), e ou t.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^ ou **

    // Moins unaire : produit seulement par to_rpn (jamais par tokenize)
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 1.5, .5, 2.) + notation scientifique (1e-3, 2.5E4)
/// - opérateurs + - * / ^ et ** (puissance)
/// - parenthèses ( )
/// - π ou pi
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, String> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance (syntaxe Python/SymPy)
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Tok::Pi);
                i += 1;
                continue;
            }
            '√' => {
                out.push(Tok::Ident("sqrt".to_string()));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Nombre : chiffres [. chiffres] [e|E [+|-] chiffres]
        if c.is_ascii_digit() || c == '.' {
            let (valeur, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(valeur));
            i = fin;
            continue;
        }

        return Err(format!("caractère inattendu: '{c}'"));
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `debut`; renvoie (valeur, indice de fin).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(f64, usize), String> {
    let mut i = debut;
    let mut chiffres = 0usize;

    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
        chiffres += 1;
    }
    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
            chiffres += 1;
        }
    }
    if chiffres == 0 {
        return Err("point isolé".into());
    }

    // Exposant seulement s’il est complet ("2e" reste 2 suivi de l’identifiant e)
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }

    let texte: String = chars[debut..i].iter().collect();
    let valeur = texte
        .parse::<f64>()
        .map_err(|_| format!("nombre invalide: {texte}"))?;
    if !valeur.is_finite() {
        return Err(format!("nombre hors limites: {texte}"));
    }
    Ok((valeur, i))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
