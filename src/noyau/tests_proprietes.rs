//! Propriétés (proptest) : arithmétique exacte sur petits entiers,
//! idempotence, machine à états.

use proptest::prelude::*;

use super::eval_expression;
use super::fonctions::ModeAngle;
use super::{EtatCalc, Mode};

fn operateur() -> impl Strategy<Value = (&'static str, fn(f64, f64) -> f64)> {
    prop_oneof![
        Just(("+", (|a: f64, b: f64| a + b) as fn(f64, f64) -> f64)),
        Just(("−", (|a: f64, b: f64| a - b) as fn(f64, f64) -> f64)),
        Just(("×", (|a: f64, b: f64| a * b) as fn(f64, f64) -> f64)),
        Just(("÷", (|a: f64, b: f64| a / b) as fn(f64, f64) -> f64)),
        Just(("^", (|a: f64, b: f64| a.powf(b)) as fn(f64, f64) -> f64)),
    ]
}

proptest! {
    #[test]
    fn prop_operation_binaire(a in 0u32..1000, b in 1u32..12, (glyphe, f) in operateur()) {
        let expr = format!("{a}{glyphe}{b}");
        let attendu = f(f64::from(a), f64::from(b));
        match eval_expression(&expr, ModeAngle::Radians, None) {
            Ok(v) => prop_assert!((v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0), "expr={} v={} attendu={}", expr, v, attendu),
            Err(e) => prop_assert!(!attendu.is_finite(), "expr={} err={}", expr, e),
        }
    }

    #[test]
    fn prop_idempotence(a in -50i32..50, b in 1i32..50, ans in -1e6f64..1e6) {
        let expr = format!("sin({a})×ans+sqrt({b})÷({a}^2+1)");
        let v1 = eval_expression(&expr, ModeAngle::Degres, Some(ans));
        let v2 = eval_expression(&expr, ModeAngle::Degres, Some(ans));
        prop_assert_eq!(v1, v2);
    }

    #[test]
    fn prop_chiffre_apres_egal(a in 0u32..10_000, d in 0u32..10) {
        let mut calc = EtatCalc::default();
        for c in a.to_string().chars() {
            calc.traiter_action(&c.to_string()).unwrap();
        }
        calc.traiter_action("equals").unwrap();
        prop_assert_eq!(calc.mode(), Mode::Resultat);

        let chiffre = d.to_string();
        calc.traiter_action(&chiffre).unwrap();
        prop_assert_eq!(calc.entree(), chiffre.as_str());
    }

    #[test]
    fn prop_negate_involution(a in 0u32..1_000_000) {
        let mut calc = EtatCalc::default();
        for c in a.to_string().chars() {
            calc.traiter_action(&c.to_string()).unwrap();
        }
        let avant = calc.entree().to_string();
        calc.traiter_action("negate").unwrap();
        calc.traiter_action("negate").unwrap();
        prop_assert_eq!(calc.entree(), avant.as_str());
    }
}
