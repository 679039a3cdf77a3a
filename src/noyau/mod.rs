//! Noyau du grapheur d’échelons périodiques
//!
//! Organisation interne :
//! - jetons.rs        : tokenisation
//! - rpn.rs           : shunting-yard + construction Expr
//! - expr.rs          : AST f64 (variable t) + repli des constantes
//! - format.rs        : affichage “joli” d’une Expr (démarche)
//! - expression.rs    : validateur (texte -> Expression immuable)
//! - programme.rs     : Expr -> programme postfixe évalué par lot
//! - superposition.rs : grille 1000 points + Σ copies décalées sous porte de Heaviside
//! - rendu.rs         : tracé plotters + encodage PNG (artefact en mémoire)
//! - pipeline.rs      : pipeline complet (trois champs texte)
//! - erreurs.rs       : erreurs récupérables (messages utilisateur)

pub mod erreurs;
pub mod expr;
pub mod expression;
pub mod format;
pub mod jetons;
pub mod pipeline;
pub mod programme;
pub mod rendu;
pub mod rpn;
pub mod superposition;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API utilisée par l’UI
pub use expression::Demarche;
pub use pipeline::tracer;
pub use rendu::ReglagesRendu;
