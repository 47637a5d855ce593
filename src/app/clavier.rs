//! src/app/clavier.rs
//!
//! Clavier -> vocabulaire d’actions du noyau.
//! Le noyau ne voit jamais de touches brutes : seulement des noms d’actions.

use eframe::egui;

/// Caractère tapé -> action (chiffres, opérateurs, parenthèses, virgule, `=`).
pub fn action_pour_caractere(c: char) -> Option<String> {
    match c {
        '0'..='9' | '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')' | ',' | '×' | '÷' | '−' => {
            Some(c.to_string())
        }
        '=' => Some("equals".to_string()),
        _ => None,
    }
}

/// Touche spéciale -> action.
pub fn action_pour_touche(key: egui::Key) -> Option<&'static str> {
    match key {
        egui::Key::Enter => Some("equals"),
        egui::Key::Backspace => Some("backspace"),
        egui::Key::Escape => Some("clear"),
        egui::Key::Delete => Some("clear-entry"),
        _ => None,
    }
}

/// Actions produites par les événements clavier de la frame.
///
/// Rien n’est produit quand un champ texte a le focus (ex: recherche dans
/// l’historique) : la frappe lui appartient.
pub fn actions_clavier(ctx: &egui::Context) -> Vec<String> {
    if ctx.wants_keyboard_input() {
        return Vec::new();
    }

    ctx.input(|i| {
        let mut out = Vec::new();
        for ev in &i.events {
            match ev {
                egui::Event::Text(texte) => {
                    out.extend(texte.chars().filter_map(action_pour_caractere));
                }
                egui::Event::Key {
                    key, pressed: true, ..
                } => {
                    out.extend(action_pour_touche(*key).map(str::to_string));
                }
                _ => {}
            }
        }
        out
    })
}
