// src/main.rs
//
// Grapheur d’échelons périodiques : natif (run_native) et web (WebRunner sur <canvas>).
// Natif : journal tracing + grapheur.toml. Web : réglages par défaut, pas de plot.png.

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod config;
mod noyau;

use app::AppGrapheur;
use config::Reglages;

const TITRE_APP: &str = app::vue::TITRE_PAGE;

const POLICE_SANS: &str = "dejavu_sans";
const POLICE_MONO: &str = "dejavu_mono";

/// DejaVu en tête des deux familles (π, √, Σ et flèches de la démarche).
fn definitions_polices() -> egui::FontDefinitions {
    use egui::{FontData, FontFamily};

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        POLICE_SANS.to_string(),
        FontData::from_static(include_bytes!("../assets/fonts/DejaVuSans.ttf")).into(),
    );
    fonts.font_data.insert(
        POLICE_MONO.to_string(),
        FontData::from_static(include_bytes!("../assets/fonts/DejaVuSansMono.ttf")).into(),
    );

    for (famille, police) in [
        (FontFamily::Proportional, POLICE_SANS),
        (FontFamily::Monospace, POLICE_MONO),
    ] {
        fonts
            .families
            .entry(famille)
            .or_default()
            .insert(0, police.to_string());
    }

    fonts
}

/// Création commune aux deux cibles : polices avant la première frame.
fn creer_app(cc: &eframe::CreationContext<'_>, reglages: Reglages) -> AppGrapheur {
    cc.egui_ctx.set_fonts(definitions_polices());
    AppGrapheur::new(reglages)
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter)
        .init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    init_tracing();

    let reglages = Reglages::charger();
    tracing::info!(chemin_artefact = ?reglages.chemin_artefact(), "démarrage");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([760.0, 860.0])
            .with_min_inner_size([480.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| Ok(Box::new(creer_app(cc, reglages)))),
    )
}

// En wasm32, le démarrage passe par `web::start` (wasm_bindgen).
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{creer_app, Reglages, TITRE_APP};

    use wasm_bindgen::{JsCast, JsValue};
    use web_sys::HtmlCanvasElement;

    const CANVAS_ID: &str = "the_canvas_id";

    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("document indisponible"))?;
        document.set_title(TITRE_APP);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("canvas introuvable"))?
            .dyn_into()
            .map_err(|_| JsValue::from_str("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(creer_app(cc, Reglages::default())))),
            )
            .await
    }
}
