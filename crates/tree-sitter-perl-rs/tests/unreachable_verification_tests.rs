//! Verifiable Tests for Unreachable Code Elimination
//!
//! This test module provides **executable verification** that previously unreachable
//! code paths have been eliminated and now return graceful errors instead of panicking.
//!
//! # Verification Approach
//!
//! These tests use a **proof-by-execution** strategy:
//! 1. Directly instantiate parsers with invalid inputs
//! 2. Verify no panic occurs (test passes = no crash)
//! 3. Verify Result::Err is returned with descriptive messages
//! 4. Validate error messages follow API contracts
//!
//! # Test Coverage
//!
//! - **Variable Declaration Errors** (simple_parser_v2.rs:118, simple_parser.rs:76)
//! - **Regression Tests**: Multiple invalid input patterns
//! - **Comprehensive Matrix**: ~30 invalid input combinations
//!
//! # Feature Gating
//!
//! Tests requiring parser instantiation are feature-gated with `#[cfg(feature = "token-parser")]`.

#[cfg(feature = "token-parser")]
mod verifiable_tests {
    use tree_sitter_perl::simple_parser::SimpleParser;
    use tree_sitter_perl::simple_parser_v2::SimpleParser as SimpleParserV2;

    /// AC1: Variable Declaration Error Handling - SimpleParserV2
    ///
    /// **Verification**: Triggers the error path at simple_parser_v2.rs:118
    /// by providing invalid tokens that would have caused unreachable!() panic.
    ///
    /// **Proof Points**:
    /// 1. Test passes without panic (executable proof)
    /// 2. Returns Result::Err
    /// 3. Error message contains expected keywords
    #[test]
    fn verify_simple_parser_v2_variable_declaration_error_handling() {
        // Trigger error path at simple_parser_v2.rs:118
        let mut parser = SimpleParserV2::new("; $var = 1;");
        let result = parser.parse();

        // VERIFICATION POINT 1: No panic occurs
        assert!(
            result.is_err(),
            "Parser must return error (not panic) for invalid variable declaration"
        );

        // VERIFICATION POINT 2: Error message is descriptive
        let error = result.unwrap_err();
        assert!(
            error.contains("my")
                || error.contains("our")
                || error.contains("local")
                || error.contains("state"),
            "Error must mention valid keywords. Got: {}",
            error
        );

        // VERIFICATION POINT 3: Error indicates expected vs found
        assert!(
            error.contains("Expected") || error.contains("found"),
            "Error must indicate expectation mismatch. Got: {}",
            error
        );
    }

    /// AC1: Variable Declaration Error Handling - SimpleParser
    ///
    /// **Verification**: Triggers the error path at simple_parser.rs:76
    /// by providing invalid tokens that would have caused unreachable!() panic.
    ///
    /// **Proof Points**:
    /// 1. Test passes without panic (executable proof)
    /// 2. Returns Result::Err
    /// 3. Error message includes position information
    #[test]
    fn verify_simple_parser_variable_declaration_error_handling() {
        // Trigger error path at simple_parser.rs:76
        let mut parser = SimpleParser::new("; $var = 1;");
        let result = parser.parse();

        // VERIFICATION POINT 1: No panic occurs
        assert!(
            result.is_err(),
            "Parser must return error (not panic) for invalid variable declaration"
        );

        // VERIFICATION POINT 2: Error message contains keywords
        let error = result.unwrap_err();
        assert!(
            error.contains("my") || error.contains("our") || error.contains("local"),
            "Error must mention valid keywords (my/our/local). Got: {}",
            error
        );

        // VERIFICATION POINT 3: Error includes position
        assert!(
            error.contains("position") || error.contains("at "),
            "Error must include position information. Got: {}",
            error
        );
    }

    /// AC6: Regression Test - SimpleParserV2 Line 118
    ///
    /// **Verification**: Tests multiple invalid inputs that would have triggered
    /// unreachable!() to prove defensive error handling is comprehensive.
    #[test]
    fn verify_regression_simple_parser_v2_line_118() {
        let test_cases = vec![
            ("; $x = 1;", "semicolon"),
            ("if ($x) { }", "if keyword"),
            ("123 $x = 1;", "numeric literal"),
            ("+ $x = 1;", "operator"),
            ("\"str\" $x = 1;", "string literal"),
        ];

        for (input, description) in test_cases {
            let mut parser = SimpleParserV2::new(input);
            let result = parser.parse();

            assert!(result.is_err(), "Must return error for {}: {}", description, input);

            let error = result.unwrap_err();
            assert!(!error.is_empty(), "Error message must not be empty for {}", description);
        }
    }

    /// AC6: Regression Test - SimpleParser Line 76
    ///
    /// **Verification**: Tests multiple invalid inputs that would have triggered
    /// unreachable!() to prove defensive error handling is comprehensive.
    #[test]
    fn verify_regression_simple_parser_line_76() {
        let test_cases = vec![
            ("; $x = 1;", "semicolon"),
            ("if ($x) { }", "if keyword"),
            ("123 $x = 1;", "numeric literal"),
            ("+ $x = 1;", "operator"),
            ("\"str\" $x = 1;", "string literal"),
        ];

        for (input, description) in test_cases {
            let mut parser = SimpleParser::new(input);
            let result = parser.parse();

            assert!(result.is_err(), "Must return error for {}: {}", description, input);

            let error = result.unwrap_err();
            assert!(!error.is_empty(), "Error message must not be empty for {}", description);
        }
    }

    /// Comprehensive Verification: Unreachable Path Elimination
    ///
    /// **Purpose**: Provides comprehensive proof that previously unreachable paths
    /// are now handled gracefully across a matrix of invalid inputs.
    ///
    /// **Verification Matrix**:
    /// - Control flow keywords in invalid positions
    /// - Operators in invalid positions
    /// - Literals in invalid positions
    /// - Variables without declaration keywords
    ///
    /// **Proof Strategy**:
    /// 1. Test ~30 invalid input combinations
    /// 2. Verify zero panics across all inputs
    /// 3. Verify all errors are descriptive
    /// 4. Print summary for audit trail
    #[test]
    fn comprehensive_unreachable_elimination_verification() {
        // Comprehensive matrix of invalid inputs
        let invalid_inputs = vec![
            // Control flow keywords
            ("if ($x) { }", "if keyword at statement position"),
            ("while ($x) { }", "while keyword at statement position"),
            ("for ($x) { }", "for keyword at statement position"),
            ("unless ($x) { }", "unless keyword at statement position"),
            // Operators and punctuation
            ("; $x = 1;", "semicolon at statement start"),
            ("+ $x = 1;", "plus operator at statement start"),
            ("- $x = 1;", "minus operator at statement start"),
            ("* $x = 1;", "multiply operator at statement start"),
            ("{ $x = 1; }", "block at statement start"),
            // Literals
            ("123 $x = 1;", "numeric literal at statement start"),
            ("\"string\" $x = 1;", "string literal at statement start"),
            ("'string' $x = 1;", "single-quoted string at statement start"),
            // Variables without declaration
            ("$x = 1;", "scalar variable without declaration"),
            ("@array = (1, 2);", "array variable without declaration"),
            ("%hash = (a => 1);", "hash variable without declaration"),
        ];

        let mut simple_parser_pass_count = 0;
        let mut simple_parser_v2_pass_count = 0;

        println!("\n=== Testing SimpleParser ===");
        for (input, description) in &invalid_inputs {
            let mut parser = SimpleParser::new(input);
            let result = parser.parse();

            // VERIFICATION: No panic occurs
            assert!(
                result.is_err(),
                "SimpleParser must error for: {}. Input: {}",
                description,
                input
            );

            let error = result.unwrap_err();

            // VERIFICATION: Error is descriptive
            assert!(!error.is_empty(), "Error must not be empty for: {}", description);

            // VERIFICATION: Error indicates problem
            assert!(
                error.contains("Expected")
                    || error.contains("found")
                    || error.contains("Unexpected")
                    || error.contains("Invalid")
                    || error.contains("EOF"),
                "Error must indicate problem for: {}. Got: {}",
                description,
                error
            );

            simple_parser_pass_count += 1;
            println!("  ✓ {} → {}", description, error.lines().next().unwrap_or(&error));
        }

        println!("\n=== Testing SimpleParserV2 ===");
        for (input, description) in &invalid_inputs {
            let mut parser = SimpleParserV2::new(input);
            let result = parser.parse();

            // VERIFICATION: No panic occurs
            assert!(
                result.is_err(),
                "SimpleParserV2 must error for: {}. Input: {}",
                description,
                input
            );

            let error = result.unwrap_err();

            // VERIFICATION: Error is descriptive
            assert!(!error.is_empty(), "Error must not be empty for: {}", description);

            // VERIFICATION: Error indicates problem
            assert!(
                error.contains("Expected")
                    || error.contains("found")
                    || error.contains("Unexpected")
                    || error.contains("Invalid")
                    || error.contains("EOF"),
                "Error must indicate problem for: {}. Got: {}",
                description,
                error
            );

            simple_parser_v2_pass_count += 1;
            println!("  ✓ {} → {}", description, error.lines().next().unwrap_or(&error));
        }

        println!("\n=== Verification Summary ===");
        println!(
            "✓ SimpleParser: {} / {} test cases passed",
            simple_parser_pass_count,
            invalid_inputs.len()
        );
        println!(
            "✓ SimpleParserV2: {} / {} test cases passed",
            simple_parser_v2_pass_count,
            invalid_inputs.len()
        );
        println!(
            "✓ Total: {} error paths verified",
            simple_parser_pass_count + simple_parser_v2_pass_count
        );
        println!("✓ Zero panics observed");
        println!("✓ All errors contain descriptive messages");
        println!("\n=== Conclusion ===");
        println!("Previously unreachable code paths have been successfully eliminated.");
        println!("All invalid inputs produce graceful error messages instead of panicking.");
        println!("Defensive error handling is comprehensive and verifiable.");
    }
}

#[cfg(not(feature = "token-parser"))]
mod placeholder_tests {
    /// Placeholder test that always passes when token-parser feature is not enabled.
    ///
    /// This ensures the test file compiles and passes even without the feature,
    /// maintaining CI compatibility.
    #[test]
    fn unreachable_elimination_requires_token_parser_feature() {
        // This test suite requires the token-parser feature to run actual verifications.
        // Run with: cargo test --features token-parser
        assert!(true, "token-parser feature not enabled; verification tests skipped");
    }
}
