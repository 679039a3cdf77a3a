//! Compilation d’une Expr en programme postfixe, évalué colonne par colonne.
//!
//! Chaque instruction agit sur des vecteurs entiers (un élément par instant t) :
//! une seule passe sur le programme évalue la fonction sur toute une tranche.

use super::expr::{Expr, Fonction};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl OpBinaire {
    fn appliquer(self, a: f64, b: f64) -> f64 {
        match self {
            OpBinaire::Add => a + b,
            OpBinaire::Sub => a - b,
            OpBinaire::Mul => a * b,
            OpBinaire::Div => a / b,
            OpBinaire::Pow => a.powf(b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Instr {
    Const(f64),
    Var,
    Neg,
    Appel(Fonction),
    Binaire(OpBinaire),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Programme {
    instrs: Vec<Instr>,
    profondeur_max: usize,
}

impl Programme {
    /// Replie les constantes puis aplatit l’arbre en postfixe.
    pub fn compiler(arbre: &Expr) -> Self {
        let simplifie = arbre.clone().simplify();

        let mut instrs = Vec::with_capacity(simplifie.taille());
        emettre(&simplifie, &mut instrs);

        // profondeur de pile nécessaire (pré-allocation à l’évaluation)
        let mut hauteur = 0usize;
        let mut profondeur_max = 0usize;
        for instr in &instrs {
            match instr {
                Instr::Const(_) | Instr::Var => hauteur += 1,
                Instr::Neg | Instr::Appel(_) => {}
                Instr::Binaire(_) => hauteur = hauteur.saturating_sub(1),
            }
            profondeur_max = profondeur_max.max(hauteur);
        }

        Self {
            instrs,
            profondeur_max,
        }
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.instrs
    }

    /// Évalue le programme pour chaque instant de `ts` (même longueur en sortie).
    pub fn evaluer_lot(&self, ts: &[f64]) -> Vec<f64> {
        let mut pile: Vec<Vec<f64>> = Vec::with_capacity(self.profondeur_max);

        for instr in &self.instrs {
            match *instr {
                Instr::Const(c) => pile.push(vec![c; ts.len()]),
                Instr::Var => pile.push(ts.to_vec()),

                Instr::Neg => {
                    if let Some(col) = pile.last_mut() {
                        col.iter_mut().for_each(|x| *x = -*x);
                    }
                }
                Instr::Appel(f) => {
                    if let Some(col) = pile.last_mut() {
                        col.iter_mut().for_each(|x| *x = f.appliquer(*x));
                    }
                }
                Instr::Binaire(op) => {
                    let (Some(b), Some(a)) = (pile.pop(), pile.last_mut()) else {
                        return vec![f64::NAN; ts.len()];
                    };
                    a.iter_mut()
                        .zip(&b)
                        .for_each(|(x, &y)| *x = op.appliquer(*x, y));
                }
            }
        }

        // programme bien formé : une seule colonne restante
        match (pile.pop(), pile.is_empty()) {
            (Some(col), true) => col,
            _ => vec![f64::NAN; ts.len()],
        }
    }
}

fn emettre(e: &Expr, out: &mut Vec<Instr>) {
    use Expr::*;

    match e {
        Const(v) => out.push(Instr::Const(*v)),
        Pi => out.push(Instr::Const(std::f64::consts::PI)),
        E => out.push(Instr::Const(std::f64::consts::E)),
        Var => out.push(Instr::Var),

        Neg(a) => {
            emettre(a, out);
            out.push(Instr::Neg);
        }
        Appel(f, a) => {
            emettre(a, out);
            out.push(Instr::Appel(*f));
        }

        Add(a, b) => binaire(a, b, OpBinaire::Add, out),
        Sub(a, b) => binaire(a, b, OpBinaire::Sub, out),
        Mul(a, b) => binaire(a, b, OpBinaire::Mul, out),
        Div(a, b) => binaire(a, b, OpBinaire::Div, out),
        Pow(a, b) => binaire(a, b, OpBinaire::Pow, out),
    }
}

fn binaire(a: &Expr, b: &Expr, op: OpBinaire, out: &mut Vec<Instr>) {
    emettre(a, out);
    emettre(b, out);
    out.push(Instr::Binaire(op));
}
