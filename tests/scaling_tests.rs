#[cfg(test)]
mod tests {
    use recipe_measure::scaling::{RecipeScalingManager, ScalingEngine, ScalingError};

    fn create_engine() -> ScalingEngine {
        let _ = env_logger::builder().is_test(true).try_init();
        ScalingEngine::new()
    }

    #[test]
    fn test_doubling_and_halving_scenarios() {
        let engine = create_engine();

        assert!(engine.scale_one("2 cups flour", 2.0).contains("4 cups"));
        assert!(engine.scale_one("1 cup sugar", 0.5).contains("½ cup"));
    }

    #[test]
    fn test_factor_from_target_scenarios() {
        let engine = create_engine();

        assert_eq!(engine.factor_from_target("2 cups flour", 4.0), Ok(2.0));
        assert_eq!(
            engine.factor_from_target("Salt to taste", 2.0),
            Err(ScalingError::NoMeasurementFound)
        );
    }

    #[test]
    fn test_identity_at_factor_one() {
        let engine = create_engine();
        let texts = [
            "2 cups flour",
            "1 1/2 cups sugar",
            "½ tsp salt",
            "3 eggs",
            "a splash of milk",
            "",
        ];

        for text in texts {
            assert_eq!(engine.scale_one(text, 1.0), text);
        }
    }

    #[test]
    fn test_units_are_never_rewritten() {
        let engine = create_engine();
        let list = vec![
            "2 cups all-purpose flour".to_string(),
            "1 tbsp olive oil, divided".to_string(),
            "500g tomatoes (crushed)".to_string(),
        ];

        let scaled = engine.scale_many(&list, 2.0);

        assert_eq!(scaled[0], "4 cups all-purpose flour");
        assert_eq!(scaled[1], "2 tbsp olive oil, divided");
        assert_eq!(scaled[2], "1000g tomatoes (crushed)");
    }

    #[test]
    fn test_scaling_session_flow() {
        let mut manager = RecipeScalingManager::new();
        manager.set_original(vec![
            "2 cups flour".to_string(),
            "1 cup sugar".to_string(),
            "2 eggs".to_string(),
        ]);

        // Double the whole recipe
        manager.apply_factor(2.0);
        assert_eq!(manager.scaled_quantities()[0], "4 cups flour");
        assert_eq!(manager.scaled_quantities()[2], "4 eggs");

        // Then pin sugar to 3 cups instead
        manager.apply_custom_scaling(1, 3.0);
        assert_eq!(manager.state().current_factor, 3.0);
        assert!(manager.state().is_custom_scaling);
        assert_eq!(manager.scaled_quantities()[0], "6 cups flour");

        // Cancelling returns to the authored recipe
        manager.reset();
        assert_eq!(manager.scaled_quantities()[0], "2 cups flour");
        assert!(!manager.state().is_custom_scaling);
    }

    #[test]
    fn test_replacing_ingredients_resets_scaling() {
        let mut manager = RecipeScalingManager::new();
        manager.set_original(vec!["2 cups flour".to_string()]);
        manager.apply_factor(4.0);

        manager.set_original(vec!["1 cup rice".to_string()]);

        assert_eq!(manager.state().current_factor, 1.0);
        assert_eq!(manager.scaled_quantities(), &["1 cup rice".to_string()]);
    }

    #[test]
    fn test_fractional_results_format_as_fractions() {
        let engine = create_engine();

        assert_eq!(engine.scale_one("1 cup flour", 0.25), "¼ cup flour");
        assert_eq!(engine.scale_one("3 cups stock", 0.5), "1½ cups stock");
        assert_eq!(engine.scale_one("1 1/2 tsp salt", 0.5), "¾ tsp salt");
    }

    #[test]
    fn test_scaling_after_conversion() {
        use recipe_measure::unit_catalog::MeasurementSystem;
        use recipe_measure::unit_converter::UnitConverter;

        let converter = UnitConverter::new();
        let engine = create_engine();

        let metric = converter.convert("2 cups flour", MeasurementSystem::Metric);
        let doubled = engine.scale_one(&metric, 2.0);

        assert_eq!(doubled, "946.36 ml flour");
    }
}
