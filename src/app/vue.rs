// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppGrapheur (etat.rs) pour natif + wasm
// - Formulaire à trois champs, toujours ré-affiché (écho) après une tentative
// - Clavier : Enter trace (quand un champ est focus)
// - Résultat : image, sinon message d’erreur, sinon placeholder
//
// Note :
// - PAS de Key::NumEnter (n’existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppGrapheur, ImageTrace};

pub const TITRE_PAGE: &str = "Periodic Step-Function Grapher";
pub const PLACEHOLDER: &str = "Submit a function to generate the plot.";

impl AppGrapheur {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(TITRE_PAGE);
                ui.add_space(6.0);

                self.ui_formulaire(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_formulaire(&mut self, ui: &mut egui::Ui) {
        ui.label("Function (in variable t):");
        let resp_f = ui.add(
            egui::TextEdit::singleline(&mut self.fonction)
                .desired_width(ui.available_width())
                .hint_text("Ex: heaviside(t) - heaviside(t - 0.5), exp(-t)*sin(2*pi*t)")
                .id_source("fonction_edit")
                .code_editor(),
        );

        // Après un clic sur un bouton, on redonne le focus au champ fonction
        if self.focus_entree {
            resp_f.request_focus();
            self.focus_entree = false;
        }

        let mut focus = resp_f.has_focus() || resp_f.lost_focus();

        egui::Grid::new("champs_numeriques")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Time Gap between repetitions:");
                let r = ui.add(
                    egui::TextEdit::singleline(&mut self.intervalle)
                        .hint_text("Ex: 1.5")
                        .id_source("intervalle_edit"),
                );
                focus |= r.has_focus() || r.lost_focus();
                ui.end_row();

                ui.label("Number of repetitions:");
                let r = ui.add(
                    egui::TextEdit::singleline(&mut self.repetitions)
                        .hint_text("Ex: 4")
                        .id_source("repetitions_edit"),
                );
                focus |= r.has_focus() || r.lost_focus();
                ui.end_row();
            });

        // --- Clavier : Enter trace (un singleline perd le focus sur Enter) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if focus && enter {
            self.tracer_via_noyau();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let plot = ui.add_sized([72.0, 30.0], egui::Button::new("Plot"));
            if plot.clicked() {
                self.tracer_via_noyau();
            }

            ui.separator();

            // Contrat: C = champ fonction ; CLR = résultats ; AC = tout (retour aux réglages)
            self.bouton_action(ui, "C", "Efface le champ fonction", Action::ClearEntree);
            self.bouton_action(ui, "CLR", "Efface image + erreur + démarche", Action::ClearResultats);
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
        });

        ui.add_space(8.0);

        // Touches rapides (insérées dans le champ fonction)
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "t", "t", InsertKind::Word);
            self.bouton_insert(ui, "pi", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);

            ui.separator();

            for f in ["heaviside", "sin", "cos", "exp", "sqrt", "log", "abs"] {
                self.bouton_insert(ui, f, &format!("{f}("), InsertKind::Func);
            }
        });
    }

    fn ui_resultat(&mut self, ui: &mut egui::Ui) {
        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
            return;
        }

        if !self.avertissement.is_empty() {
            ui.colored_label(ui.visuals().warn_fg_color, &self.avertissement);
        }

        let Some(image) = &self.image else {
            if !self.a_tente {
                ui.label(PLACEHOLDER);
            }
            return;
        };

        // Nouvelle image => nouvelle texture (une seule fois par tracé)
        if self.texture_perimee || self.texture.is_none() {
            self.texture = Some(charger_texture(ui.ctx(), image));
            self.texture_perimee = false;
        }

        if let Some(texture) = &self.texture {
            ui.add(egui::Image::new(texture).shrink_to_fit());
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                Self::champ_demarche(ui, "Avant", "demarche_avant", &self.demarche.avant);
                Self::champ_demarche(ui, "Après", "demarche_apres", &self.demarche.apres);
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(2.0 * ui.text_style_height(&egui::TextStyle::Monospace));
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        inserer(&mut self.fonction, to_insert, kind);
        self.focus_entree = true;
    }

    /// Trace via le noyau, persiste l’artefact (natif) puis dépose image/erreur dans l’état UI.
    fn tracer_via_noyau(&mut self) {
        match crate::noyau::tracer(&self.fonction, &self.intervalle, &self.repetitions, &self.rendu) {
            Ok(trace) => {
                #[cfg(not(target_arch = "wasm32"))]
                let ecriture = self
                    .chemin_artefact
                    .as_deref()
                    .map(|chemin| trace.artefact.ecrire(chemin));

                let (largeur, hauteur) = trace.artefact.dimensions();
                let image = ImageTrace {
                    largeur: largeur as usize,
                    hauteur: hauteur as usize,
                    rgb: trace.artefact.rgb().to_vec(),
                };
                self.set_resultats(image, trace.demarche);

                #[cfg(not(target_arch = "wasm32"))]
                match ecriture {
                    Some(Err(e)) => {
                        tracing::warn!(erreur = %e, "artefact non écrit");
                        self.set_avertissement(e.to_string());
                    }
                    Some(Ok(())) => tracing::info!(
                        chemin = ?self.chemin_artefact,
                        "artefact écrit"
                    ),
                    None => {}
                }
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}

fn charger_texture(ctx: &egui::Context, image: &ImageTrace) -> egui::TextureHandle {
    let couleurs = egui::ColorImage::from_rgb([image.largeur, image.hauteur], &image.rgb);
    ctx.load_texture("trace_png", couleurs, egui::TextureOptions::LINEAR)
}

/// Insertion d’un motif en fin de champ, avec espaces “lisibles”.
fn inserer(entree: &mut String, to_insert: &str, kind: InsertKind) {
    match kind {
        InsertKind::CloseParen => {
            while entree.ends_with(' ') {
                entree.pop();
            }
            entree.push_str(to_insert);
        }
        InsertKind::OpenParen | InsertKind::Func => {
            let last = entree.chars().rev().find(|c| !c.is_whitespace());
            if let Some(c) = last {
                if c.is_ascii_digit() || c.is_ascii_alphabetic() || c == ')' {
                    // pas de multiplication implicite : on la rend explicite
                    entree.push_str(" * ");
                }
            }
            entree.push_str(to_insert);
        }
        InsertKind::Op => {
            while entree.ends_with(' ') {
                entree.pop();
            }
            if !entree.is_empty() {
                entree.push(' ');
            }
            entree.push_str(to_insert);
            entree.push(' ');
        }
        InsertKind::Word => {
            let last = entree.chars().rev().find(|c| !c.is_whitespace());
            if let Some(c) = last {
                if c.is_ascii_alphanumeric() || c == ')' {
                    entree.push_str(" * ");
                }
            }
            entree.push_str(to_insert);
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}

#[cfg(test)]
mod tests {
    use super::{inserer, InsertKind};
    use crate::noyau::expression::Expression;

    fn saisir(touches: &[(&str, InsertKind)]) -> String {
        let mut s = String::new();
        for (t, k) in touches {
            inserer(&mut s, t, *k);
        }
        s
    }

    #[test]
    fn touches_donnent_une_expression_valide() {
        let s = saisir(&[
            ("heaviside(", InsertKind::Func),
            ("t", InsertKind::Word),
            ("-", InsertKind::Op),
            ("pi", InsertKind::Word),
            (")", InsertKind::CloseParen),
            ("sin(", InsertKind::Func),
            ("t", InsertKind::Word),
            (")", InsertKind::CloseParen),
        ]);
        assert_eq!(s, "heaviside(t - pi) * sin(t)");
        assert!(Expression::nouvelle(&s).is_ok());
    }

    #[test]
    fn mots_consecutifs_multiplies() {
        let s = saisir(&[("t", InsertKind::Word), ("e", InsertKind::Word), ("(", InsertKind::OpenParen)]);
        assert_eq!(s, "t * e * (");
    }
}
