// src/noyau/expr.rs
//
// AST numérique (f64) sur une seule variable libre : t.
// - Const : littéral décimal
// - Pi, E : constantes nommées (gardées symboliques pour l’affichage)
// - Var   : la variable t
// - Appel : fonction unaire (sin, exp, heaviside…)
//
// IMPORTANT :
// - simplify() ne replie que les sous-arbres SANS variable (aucune règle algébrique).
// - Une valeur non finie repliée reste dans l’arbre : c’est l’évaluation qui la signale.

/// Nom de l’unique variable libre.
pub const VARIABLE: &str = "t";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Signe,
    Plancher,
    Plafond,
    Heaviside,
}

impl Fonction {
    /// Identificateur (déjà en minuscules) -> fonction reconnue.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        use Fonction::*;

        Some(match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "exp" => Exp,
            "log" | "ln" => Ln,
            "sqrt" => Sqrt,
            "abs" => Abs,
            "sign" => Signe,
            "floor" => Plancher,
            "ceil" | "ceiling" => Plafond,
            "heaviside" => Heaviside,
            _ => return None,
        })
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;

        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Exp => "exp",
            Ln => "log",
            Sqrt => "sqrt",
            Abs => "abs",
            Signe => "sign",
            Plancher => "floor",
            Plafond => "ceiling",
            Heaviside => "heaviside",
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        use Fonction::*;

        match self {
            Sin => x.sin(),
            Cos => x.cos(),
            Tan => x.tan(),
            Asin => x.asin(),
            Acos => x.acos(),
            Atan => x.atan(),
            Sinh => x.sinh(),
            Cosh => x.cosh(),
            Tanh => x.tanh(),
            Exp => x.exp(),
            Ln => x.ln(),
            Sqrt => x.sqrt(),
            Abs => x.abs(),
            // signum(0) vaut 1 en Rust : on veut 0
            Signe => {
                if x == 0.0 {
                    0.0
                } else {
                    x.signum()
                }
            }
            Plancher => x.floor(),
            Plafond => x.ceil(),
            // H(0) = 1/2
            Heaviside => {
                if x.is_nan() {
                    f64::NAN
                } else if x < 0.0 {
                    0.0
                } else if x == 0.0 {
                    0.5
                } else {
                    1.0
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Const(f64),
    Pi,
    E,

    Var,

    Neg(Box<Expr>),
    Appel(Fonction, Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Évaluation scalaire (référence) en un point t.
    pub fn evaluer(&self, t: f64) -> f64 {
        use Expr::*;

        match self {
            Const(v) => *v,
            Pi => std::f64::consts::PI,
            E => std::f64::consts::E,
            Var => t,

            Neg(a) => -a.evaluer(t),
            Appel(f, a) => f.appliquer(a.evaluer(t)),

            Add(a, b) => a.evaluer(t) + b.evaluer(t),
            Sub(a, b) => a.evaluer(t) - b.evaluer(t),
            Mul(a, b) => a.evaluer(t) * b.evaluer(t),
            Div(a, b) => a.evaluer(t) / b.evaluer(t),
            Pow(a, b) => a.evaluer(t).powf(b.evaluer(t)),
        }
    }

    /// Repliement des constantes : tout sous-arbre sans t devient Const.
    /// Les feuilles Pi/E isolées restent symboliques.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            Const(_) | Pi | E | Var => self,
            _ if !self.contient_var() => Const(self.evaluer(0.0)),

            Neg(a) => Neg(Box::new(a.simplify())),
            Appel(f, a) => Appel(f, Box::new(a.simplify())),

            Add(a, b) => Add(Box::new(a.simplify()), Box::new(b.simplify())),
            Sub(a, b) => Sub(Box::new(a.simplify()), Box::new(b.simplify())),
            Mul(a, b) => Mul(Box::new(a.simplify()), Box::new(b.simplify())),
            Div(a, b) => Div(Box::new(a.simplify()), Box::new(b.simplify())),
            Pow(a, b) => Pow(Box::new(a.simplify()), Box::new(b.simplify())),
        }
    }

    /// Détecte si l’expression dépend de t.
    /// Itératif : pas de récursion profonde sur les longues chaînes d’opérateurs.
    pub fn contient_var(&self) -> bool {
        use Expr::*;

        let mut pile: Vec<&Expr> = Vec::with_capacity(32);
        pile.push(self);

        while let Some(e) = pile.pop() {
            match e {
                Var => return true,

                Const(_) | Pi | E => {}

                Neg(x) | Appel(_, x) => pile.push(x.as_ref()),

                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(a.as_ref());
                    pile.push(b.as_ref());
                }
            }
        }

        false
    }

    /// Nombre de noeuds (journaux / démarche).
    pub fn taille(&self) -> usize {
        use Expr::*;

        match self {
            Const(_) | Pi | E | Var => 1,
            Neg(x) | Appel(_, x) => 1 + x.taille(),
            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                1 + a.taille() + b.taille()
            }
        }
    }
}
