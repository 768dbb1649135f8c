pub mod cursor;
pub mod parser;
pub mod xml;

pub use cursor::TokenCursor;
pub use parser::{Diagnostic, DiagnosticMode, ParseOutput, Parser};
pub use xml::{escape, tokens_xml, XmlWriter};

#[cfg(test)]
mod tests {
    use super::*;
    use jack_lexer::Lexer;

    fn parse_str(input: &str) -> ParseOutput {
        let tokens = Lexer::new(input).tokenize();
        Parser::new(tokens).parse_class().expect("Parsing should not hit end of input")
    }

    fn trimmed(out: &ParseOutput) -> Vec<&str> {
        out.lines.iter().map(|l| l.trim()).collect()
    }

    /// Every opening tag must be closed, in order.
    fn assert_balanced(out: &ParseOutput) {
        let mut stack: Vec<String> = Vec::new();
        for line in &out.lines {
            let l = line.trim();
            if l.starts_with("</") {
                let tag = &l[2..l.len() - 1];
                assert_eq!(stack.pop().as_deref(), Some(tag), "unbalanced at {}", l);
            } else if !l.contains("</") {
                stack.push(l[1..l.len() - 1].to_string());
            }
        }
        assert!(stack.is_empty(), "unclosed tags: {:?}", stack);
    }

    /// Wrap statements in a minimal class so they can be parsed.
    fn in_function(body: &str) -> String {
        format!("class T {{ function void f() {{ {} }} }}", body)
    }

    #[test]
    fn test_empty_class() {
        let out = parse_str("class C { }");
        assert!(out.is_clean());
        assert_eq!(
            out.lines,
            vec![
                "<class>",
                "  <keyword> class </keyword>",
                "  <identifier> C </identifier>",
                "  <symbol> { </symbol>",
                "  <symbol> } </symbol>",
                "</class>",
            ]
        );
    }

    #[test]
    fn test_class_var_dec() {
        let out = parse_str("class P { field int x, y; static Array cache; }");
        assert!(out.is_clean());
        assert_balanced(&out);
        let lines = trimmed(&out);
        assert_eq!(lines.iter().filter(|l| **l == "<classVarDec>").count(), 2);
        assert!(lines.contains(&"<identifier> Array </identifier>"));
        assert!(lines.contains(&"<symbol> , </symbol>"));
    }

    #[test]
    fn test_subroutine_structure() {
        let src = "class Main {
            function int add(int a, boolean b, Point p) {
                var int sum;
                var char c, d;
                let sum = a;
                return sum;
            }
            constructor Main new() { return this; }
            method void run() { return; }
        }";
        let out = parse_str(src);
        assert!(out.is_clean(), "{:?}", out.diagnostics);
        assert_balanced(&out);
        let lines = trimmed(&out);
        assert_eq!(lines.iter().filter(|l| **l == "<subroutineDec>").count(), 3);
        assert_eq!(lines.iter().filter(|l| **l == "<varDec>").count(), 2);
        assert_eq!(lines.iter().filter(|l| **l == "<parameterList>").count(), 3);
        assert!(lines.contains(&"<keyword> boolean </keyword>"));
        assert!(lines.contains(&"<keyword> this </keyword>"));
        assert!(lines.contains(&"<keyword> void </keyword>"));
    }

    #[test]
    fn test_statements() {
        let src = in_function(
            "let a[i] = -x + (y * 2);
             if (a < b) { do f(); } else { while (~done) { let i = i + 1; } }
             do Output.printString(\"x & y\");
             return;",
        );
        let out = parse_str(&src);
        assert!(out.is_clean(), "{:?}", out.diagnostics);
        assert_balanced(&out);
        let lines = trimmed(&out);
        for tag in [
            "<letStatement>",
            "<ifStatement>",
            "<whileStatement>",
            "<doStatement>",
            "<returnStatement>",
            "<expressionList>",
        ] {
            assert!(lines.contains(&tag), "missing {}", tag);
        }
        assert!(lines.contains(&"<symbol> &lt; </symbol>"));
        assert!(lines.contains(&"<stringConstant> x &amp; y </stringConstant>"));
        assert!(lines.contains(&"<keyword> else </keyword>"));
    }

    #[test]
    fn test_array_access_term() {
        let out = parse_str(&in_function("let x = foo[5];"));
        assert!(out.is_clean());
        let lines = trimmed(&out);
        let at = lines
            .iter()
            .position(|l| *l == "<identifier> foo </identifier>")
            .expect("foo emitted");
        assert_eq!(lines[at - 1], "<term>");
        assert_eq!(lines[at + 1], "<symbol> [ </symbol>");
        assert_eq!(lines[at + 2], "<expression>");
        assert_eq!(lines[at + 3], "<term>");
        assert_eq!(lines[at + 4], "<integerConstant> 5 </integerConstant>");
        assert_eq!(lines[at + 7], "<symbol> ] </symbol>");
    }

    #[test]
    fn test_call_terms_use_lookahead() {
        let out = parse_str(&in_function("let x = a.b(1, 2) + g() + v;"));
        assert!(out.is_clean());
        let lines = trimmed(&out);
        assert!(lines.contains(&"<symbol> . </symbol>"));
        assert_eq!(lines.iter().filter(|l| **l == "<expressionList>").count(), 2);
        // the plain name is a bare leaf inside its term
        let v = lines
            .iter()
            .position(|l| *l == "<identifier> v </identifier>")
            .unwrap();
        assert_eq!(lines[v - 1], "<term>");
        assert_eq!(lines[v + 1], "</term>");
    }

    #[test]
    fn test_return_with_and_without_expression() {
        let out = parse_str(&in_function("return; return x; return -1; return (1);"));
        assert!(out.is_clean());
        let lines = trimmed(&out);
        assert_eq!(lines.iter().filter(|l| **l == "<returnStatement>").count(), 4);
        assert_eq!(lines.iter().filter(|l| **l == "<expression>").count(), 4);
    }

    #[test]
    fn test_missing_equals_reports_and_continues() {
        let src = in_function("let x 5; let y = 2;");
        let out = parse_str(&src);
        assert_eq!(out.diagnostics.len(), 1);
        let diag = &out.diagnostics[0];
        assert!(diag.message.contains('='));
        assert!(diag.message.contains("'5'"));
        let lines = trimmed(&out);
        assert!(lines.contains(&"<error> Expected =, received '5' </error>"));
        // the rest of the file is still parsed
        assert!(lines.contains(&"<identifier> y </identifier>"));
        assert_eq!(lines.last(), Some(&"</class>"));
    }

    #[test]
    fn test_wrong_keyword_message() {
        let out = parse_str("klass C { }");
        assert!(!out.is_clean());
        assert!(out.lines[1].contains("Expected 'class' keyword, received 'klass'"));
    }

    #[test]
    fn test_bad_term() {
        let out = parse_str(&in_function("let x = ;"));
        assert_eq!(out.diagnostics.len(), 1);
        assert!(out.diagnostics[0].message.starts_with("Expected term"));
    }

    #[test]
    fn test_term_and_type_start_sets() {
        let out = parse_str(&in_function("do f(~x, null, -1, \"s\"); return -1;"));
        assert!(out.is_clean(), "{:?}", out.diagnostics);
        let lines = trimmed(&out);
        assert!(lines.contains(&"<keyword> null </keyword>"));
        assert!(lines.contains(&"<symbol> ~ </symbol>"));
        assert_eq!(lines.iter().filter(|l| **l == "<symbol> , </symbol>").count(), 3);

        // `void` is a keyword but not a variable type
        let out = parse_str(&in_function("var void v;"));
        assert!(!out.is_clean());
        assert_eq!(out.diagnostics[0].message, "Expected type, received 'void'");
    }

    #[test]
    fn test_strict_mode_stops_at_first_mismatch() {
        let tokens = Lexer::new(&in_function("let x 5;")).tokenize();
        let err = Parser::with_mode(tokens, DiagnosticMode::Strict)
            .parse_class()
            .unwrap_err();
        assert_eq!(err.msg, "Expected =, received '5'");
        assert_eq!(err.line, Some(1));
    }

    #[test]
    fn test_truncated_input_is_fatal() {
        let tokens = Lexer::new("class C {").tokenize();
        let err = Parser::new(tokens).parse_class().unwrap_err();
        assert!(err.msg.contains("end of input"));
        assert!(Parser::new(Vec::new()).parse_class().is_err());
    }

    #[test]
    fn test_to_xml() {
        let out = parse_str("class C { }");
        let xml = out.to_xml();
        assert!(xml.starts_with("<class>\n"));
        assert!(xml.ends_with("</class>\n"));
    }
}
