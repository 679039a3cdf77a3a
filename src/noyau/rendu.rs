//! Rendu : SerieEchantillons -> image PNG (en mémoire).
//!
//! - Tracé plotters sur un tampon RGB (BitMapBackend::with_buffer), sans fichier
//! - Encodage PNG à réglages fixes : mêmes données => mêmes octets
//! - L’artefact est rendu à l’appelant ; l’écriture disque est optionnelle (ecrire)

#[cfg(not(target_arch = "wasm32"))]
use std::io::Write;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use plotters::prelude::*;
use png::{BitDepth, ColorType, Compression, Encoder, FilterType};
use tracing::debug;

use super::erreurs::ErreurTrace;
use super::superposition::SerieEchantillons;

pub const TITRE: &str = "Function Value vs Time";
pub const LEGENDE_X: &str = "Time (t)";
pub const LEGENDE_Y: &str = "Function Value";

/// Famille utilisée par plotters pour tous les textes du graphe.
const FAMILLE: &str = "sans-serif";

pub const LARGEUR_DEFAUT: u32 = 640;
pub const HAUTEUR_DEFAUT: u32 = 480;

/// Garde-fous sur la taille d’image (anti-abus / anti-gel).
const COTE_MIN: u32 = 160;
const COTE_MAX: u32 = 4096;

/// Bornes d’axe au-delà desquelles le calcul des graduations déborde (anti-gel).
pub const BORNE_AXE: f64 = 1e300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReglagesRendu {
    pub largeur: u32,
    pub hauteur: u32,
}

impl Default for ReglagesRendu {
    fn default() -> Self {
        Self {
            largeur: LARGEUR_DEFAUT,
            hauteur: HAUTEUR_DEFAUT,
        }
    }
}

impl ReglagesRendu {
    /// Dimensions bornées à [COTE_MIN, COTE_MAX].
    pub fn bornees(largeur: u32, hauteur: u32) -> Self {
        Self {
            largeur: largeur.clamp(COTE_MIN, COTE_MAX),
            hauteur: hauteur.clamp(COTE_MIN, COTE_MAX),
        }
    }
}

/// Image produite par une évaluation réussie : PNG encodé + pixels RGB bruts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtefactTrace {
    largeur: u32,
    hauteur: u32,
    rgb: Vec<u8>,
    png: Vec<u8>,
}

impl ArtefactTrace {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.largeur, self.hauteur)
    }

    /// Pixels RGB 8 bits, ligne par ligne (affichage direct dans l’UI).
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    /// Écrit le PNG à `chemin` en remplaçant entièrement le fichier précédent.
    /// Fichier temporaire au nom unique dans le même dossier, puis renommage ;
    /// en cas d’échec le temporaire est supprimé.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn ecrire(&self, chemin: &Path) -> Result<(), ErreurTrace> {
        let echec = |e: std::io::Error| ErreurTrace::EcritureArtefact {
            chemin: chemin.to_path_buf(),
            detail: e.to_string(),
        };

        let parent = match chemin.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(echec)?;

        let mut temporaire = tempfile::NamedTempFile::new_in(parent).map_err(echec)?;
        temporaire.write_all(&self.png).map_err(echec)?;
        temporaire.persist(chemin).map_err(|e| echec(e.error))?;

        debug!(chemin = %chemin.display(), octets = self.png.len(), "artefact écrit");
        Ok(())
    }
}

/* ------------------------ Police (plotters / ab_glyph) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn installer_police() -> Result<(), ErreurTrace> {
    static POLICE: std::sync::OnceLock<bool> = std::sync::OnceLock::new();

    let ok = *POLICE.get_or_init(|| {
        plotters::style::register_font(
            FAMILLE,
            FontStyle::Normal,
            include_bytes!("../../assets/fonts/DejaVuSans.ttf"),
        )
        .is_ok()
    });

    if ok {
        Ok(())
    } else {
        Err(ErreurTrace::rendu("police DejaVuSans illisible"))
    }
}

// En wasm32, plotters délègue les polices au navigateur.
#[cfg(target_arch = "wasm32")]
fn installer_police() -> Result<(), ErreurTrace> {
    Ok(())
}

/* ------------------------ Axes ------------------------ */

/// Plage d’un axe ; une plage dégénérée (min == max) est élargie autour de la valeur.
/// Refusée si une borne sort de ±BORNE_AXE : plotters ne sait plus graduer.
fn plage(min: f64, max: f64, marge: f64) -> Result<(f64, f64), ErreurTrace> {
    let etendue = max - min;
    let (bas, haut) = if etendue > 0.0 {
        (min - etendue * marge, max + etendue * marge)
    } else {
        let demi = (min.abs() * 0.1).max(1.0);
        (min - demi, max + demi)
    };

    if bas.is_finite() && haut.is_finite() && bas >= -BORNE_AXE && haut <= BORNE_AXE {
        Ok((bas, haut))
    } else {
        Err(ErreurTrace::rendu(format!(
            "valeurs hors de l’axe traçable [{min:e}, {max:e}] (max ±{BORNE_AXE:e})"
        )))
    }
}

/* ------------------------ Rendu ------------------------ */

/// Trace la série (courbe, titre, légendes d’axes, grille) et l’encode en PNG.
pub fn rendre(
    serie: &SerieEchantillons,
    reglages: &ReglagesRendu,
) -> Result<ArtefactTrace, ErreurTrace> {
    installer_police()?;

    let ReglagesRendu { largeur, hauteur } =
        ReglagesRendu::bornees(reglages.largeur, reglages.hauteur);

    let t = serie.temps();
    let (t_min, t_max) = match (t.first(), t.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => return Err(ErreurTrace::rendu("série vide")),
    };
    let (v_min, v_max) = serie
        .bornes_valeurs()
        .ok_or_else(|| ErreurTrace::rendu("série vide"))?;

    let (x0, x1) = plage(t_min, t_max, 0.0)?;
    let (y0, y1) = plage(v_min, v_max, 0.05)?;

    let mut rgb = vec![0u8; largeur as usize * hauteur as usize * 3];
    {
        let racine = BitMapBackend::with_buffer(&mut rgb, (largeur, hauteur)).into_drawing_area();
        racine.fill(&WHITE).map_err(ErreurTrace::rendu)?;

        let mut graphe = ChartBuilder::on(&racine)
            .caption(TITRE, (FAMILLE, 22.0))
            .margin(12)
            .set_label_area_size(LabelAreaPosition::Left, 64)
            .set_label_area_size(LabelAreaPosition::Bottom, 48)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(ErreurTrace::rendu)?;

        graphe
            .configure_mesh()
            .x_desc(LEGENDE_X)
            .y_desc(LEGENDE_Y)
            .draw()
            .map_err(ErreurTrace::rendu)?;

        graphe
            .draw_series(LineSeries::new(serie.points(), &BLUE))
            .map_err(ErreurTrace::rendu)?;

        racine.present().map_err(ErreurTrace::rendu)?;
    }

    let png = encoder_png(&rgb, largeur, hauteur)?;
    debug!(largeur, hauteur, octets = png.len(), "graphe rendu");

    Ok(ArtefactTrace {
        largeur,
        hauteur,
        rgb,
        png,
    })
}

/// Encodage PNG déterministe (compression et filtre fixes).
fn encoder_png(rgb: &[u8], largeur: u32, hauteur: u32) -> Result<Vec<u8>, ErreurTrace> {
    let mut octets = Vec::new();
    {
        let mut encodeur = Encoder::new(&mut octets, largeur, hauteur);
        encodeur.set_color(ColorType::Rgb);
        encodeur.set_depth(BitDepth::Eight);
        encodeur.set_compression(Compression::Default);
        encodeur.set_filter(FilterType::NoFilter);

        let mut ecrivain = encodeur.write_header().map_err(ErreurTrace::rendu)?;
        ecrivain.write_image_data(rgb).map_err(ErreurTrace::rendu)?;
        ecrivain.finish().map_err(ErreurTrace::rendu)?;
    }
    Ok(octets)
}
