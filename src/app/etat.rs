//! src/app/etat.rs
//!
//! État UI du grapheur (sans vue, sans noyau).
//!
//! Rôle : contenir les trois champs du formulaire, le dernier résultat (image ou
//! erreur), la démarche et les réglages, et offrir des opérations simples
//! (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing, pas de tracé).
//! - Le formulaire n’est jamais effacé par un résultat : il reste affiché (écho).
//! - Erreur et image s’excluent : une erreur retire l’image précédente.

use std::path::PathBuf;

use eframe::egui;

use crate::config::Reglages;
use crate::noyau::{Demarche, ReglagesRendu};

/// Pixels d’un tracé réussi, prêts à être envoyés à egui.
#[derive(Clone, Debug)]
pub struct ImageTrace {
    pub largeur: usize,
    pub hauteur: usize,
    pub rgb: Vec<u8>,
}

pub struct AppGrapheur {
    // --- formulaire (re-affiché après chaque tentative) ---
    pub fonction: String,
    pub intervalle: String,
    pub repetitions: String,

    // --- sorties ---
    pub erreur: String,       // message utilisateur (si le tracé échoue)
    pub avertissement: String, // tracé OK mais écriture de plot.png impossible
    pub image: Option<ImageTrace>,
    pub a_tente: bool, // false => placeholder “Submit a function…”

    // --- texture egui (recréée quand `image` change) ---
    pub texture: Option<egui::TextureHandle>,
    pub texture_perimee: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub rendu: ReglagesRendu,
    pub chemin_artefact: Option<PathBuf>,
    formulaire_initial: (String, String, String),

    // --- UX ---
    // Permet à vue.rs de redonner le focus au champ fonction après un clic.
    pub focus_entree: bool,
}

impl Default for AppGrapheur {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppGrapheur {
    pub fn new(reglages: Reglages) -> Self {
        let f = reglages.formulaire();
        let formulaire_initial = (f.fonction, f.intervalle, f.repetitions);

        Self {
            fonction: formulaire_initial.0.clone(),
            intervalle: formulaire_initial.1.clone(),
            repetitions: formulaire_initial.2.clone(),
            erreur: String::new(),
            avertissement: String::new(),
            image: None,
            a_tente: false,
            texture: None,
            texture_perimee: false,
            demarche: Demarche::default(),
            rendu: reglages.rendu(),
            chemin_artefact: reglages.chemin_artefact(),
            formulaire_initial,
            focus_entree: true,
        }
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : formulaire revenu aux valeurs des réglages + résultats effacés.
    pub fn reset_total(&mut self) {
        let (f, h, n) = self.formulaire_initial.clone();
        self.fonction = f;
        self.intervalle = h;
        self.repetitions = n;
        self.clear_resultats();
        self.a_tente = false;
    }

    /// C : effacer seulement le champ fonction.
    pub fn clear_entree(&mut self) {
        self.fonction.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer image + erreur + démarche (sans toucher au formulaire).
    pub fn clear_resultats(&mut self) {
        self.erreur.clear();
        self.avertissement.clear();
        self.retirer_image();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    fn retirer_image(&mut self) {
        self.image = None;
        self.texture = None;
        self.texture_perimee = false;
    }

    /// Échec : message affiché à la place de l’image (pas d’artefact partiel).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.a_tente = true;
        self.erreur = msg.into();
        self.avertissement.clear();
        self.retirer_image();
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Succès : nouvelle image (texture à recréer) + démarche.
    pub fn set_resultats(&mut self, image: ImageTrace, demarche: Demarche) {
        self.a_tente = true;
        self.erreur.clear();
        self.avertissement.clear();
        self.image = Some(image);
        self.texture_perimee = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Tracé affiché mais non persisté.
    pub fn set_avertissement(&mut self, msg: impl Into<String>) {
        self.avertissement = msg.into();
    }
}
