// src/noyau/format.rs
//
// Affichage des résultats f64.
// - très grand (> 1e15) ou très petit non nul (< 1e-10) : exponentielle, 6 décimales
// - sinon arrondi à 10 décimales (anti bruit flottant : 0.1+0.2 -> 0.3)
// - entier : sans point décimal

/// Seuils de bascule en notation exponentielle.
const GRAND: f64 = 1e15;
const PETIT: f64 = 1e-10;

/// Texte affiché pour un résultat.
pub fn formater_resultat(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string(); // -0 compris
    }

    let a = v.abs();
    if a > GRAND || a < PETIT {
        return exponentielle(v);
    }

    let arrondi = format!("{v:.10}").parse::<f64>().unwrap_or(v);
    if arrondi == 0.0 {
        "0".to_string()
    } else {
        format!("{arrondi}")
    }
}

/// 1.234568e+20 / -1.000000e-11 (mantisse 6 décimales, exposant signé).
fn exponentielle(v: f64) -> String {
    let brut = format!("{v:.6e}");
    match brut.split_once('e') {
        Some((mantisse, exposant)) if !exposant.starts_with('-') => {
            format!("{mantisse}e+{exposant}")
        }
        _ => brut,
    }
}

/// Texte sans perte (aller-retour exact), jamais en notation exponentielle :
/// sert à réinjecter un résultat dans l’entrée.
pub fn nombre_brut(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        format!("{v}")
    }
}
