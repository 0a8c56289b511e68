use perl_parser_pest::ParseError;
use perl_parser_pest::pure_rust_parser::{AstNode, PerlParser, PureRustPerlParser, Rule};
use perl_ts_heredoc_parser::lexer_adapter::LexerAdapter;
use pest::Parser;

/// A Perl parser that handles context-sensitive constructs
/// by preprocessing the input to disambiguate slashes
pub struct DisambiguatedParser;

impl DisambiguatedParser {
    /// Parse Perl code with slash disambiguation
    pub fn parse(input: &str) -> Result<AstNode, ParseError> {
        // Step 1: Preprocess the input to disambiguate slashes
        let preprocessed = LexerAdapter::preprocess(input);
        #[cfg(test)]
        {
            eprintln!("Preprocessed '{}' to '{}'", input, preprocessed);
            // Also show what tokens the lexer produces
            let mut lexer = perl_ts_heredoc_parser::perl_lexer::PerlLexer::new(input);
            eprintln!("Tokens:");
            while let Some(token) = lexer.next_token() {
                eprintln!("  {:?} at {}..{}", token.token_type, token.start, token.end);
                if matches!(token.token_type, perl_ts_heredoc_parser::perl_lexer::TokenType::EOF) {
                    break;
                }
            }
        }

        // Step 2: Parse with the modified input
        let pairs = PerlParser::parse(Rule::program, &preprocessed).map_err(|_e| {
            #[cfg(test)]
            eprintln!("Parse error: {:?}", _e);
            ParseError::ParseFailed
        })?;

        // Step 3: Build AST
        let mut parser = PureRustPerlParser::new();
        let mut ast = None;
        for pair in pairs {
            ast = parser.build_node(pair).map_err(|_| ParseError::ParseFailed)?;
        }

        // Step 4: Postprocess to restore original tokens
        if let Some(ref mut node) = ast {
            LexerAdapter::postprocess(node);
        }

        ast.ok_or(ParseError::ParseFailed)
    }

    /// Parse and return S-expression format
    pub fn parse_to_sexp(input: &str) -> Result<String, ParseError> {
        let ast = Self::parse(input)?;
        let parser = PureRustPerlParser::new();
        Ok(parser.to_sexp(&ast))
    }
}
