//! Definition extraction and cross references over the sample sources

use std::fs;

use srcxref::analysis::{analyze, analyze_source, AnalysisOptions};
use srcxref::lines::LineTerminatorPolicy;
use srcxref::symbols::{SymbolDefinition, SymbolKind};
use srcxref::{AnalysisError, Diagnostic, LanguageProfile};

fn read_fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {}", path, e))
}

fn options(policy: LineTerminatorPolicy, profile: &'static LanguageProfile) -> AnalysisOptions {
    AnalysisOptions {
        policy,
        profile,
        include_trivia: false,
    }
}

fn summary(tags: &[SymbolDefinition]) -> Vec<(SymbolKind, String, usize)> {
    tags.iter()
        .map(|d| (d.kind, d.qualified_name(), d.decl_line))
        .collect()
}

#[test]
fn test_class_header_reports_members_not_prototypes() {
    let source = read_fixture("ancestor.h");
    let analysis = analyze_source(
        &source,
        &options(LineTerminatorPolicy::Wide, LanguageProfile::cpp()),
    );
    assert_eq!(
        summary(analysis.definitions.tags()),
        vec![
            (SymbolKind::Macro, "ANCESTOR_H".to_string(), 1),
            (SymbolKind::Class, "Ancestor".to_string(), 5),
            (SymbolKind::Variable, "Ancestor::count_".to_string(), 9),
        ]
    );
    assert!(!analysis.definitions.has_symbol("addInstance"));
}

#[test]
fn test_out_of_class_member_definition() {
    let source = read_fixture("ancestor.cpp");
    let analysis = analyze_source(
        &source,
        &options(LineTerminatorPolicy::Wide, LanguageProfile::cpp()),
    );
    let tags = analysis.definitions.tags();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].name, "addInstance");
    assert_eq!(tags[0].kind, SymbolKind::Function);
    assert_eq!(tags[0].scope_path, vec!["Ancestor".to_string()]);
    assert_eq!(tags[0].decl_line, 3);
    assert_eq!(
        tags[0].signature,
        "void Ancestor::addInstance(const char *name, uint32_t id)"
    );
    assert_eq!(
        analysis.definitions.definition_at("addInstance", 3),
        Some(SymbolKind::Function)
    );
    assert!(analysis.diagnostics.is_empty());
}

#[test]
fn test_sdt_macros() {
    let source = read_fixture("sdt.h");
    let analysis = analyze_source(
        &source,
        &options(LineTerminatorPolicy::Wide, LanguageProfile::c()),
    );
    let tags = analysis.definitions.tags();
    let names: Vec<&str> = tags.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "_SYS_SDT_H",
            "_SDT_ASM_1",
            "_SDT_ASM_2",
            "_SDT_NOP",
            "_SDT_NOTE_NAME",
            "_SDT_PROBE",
        ]
    );
    assert!(tags
        .iter()
        .all(|d| d.kind == SymbolKind::Macro && d.scope_path.is_empty()));
    assert_eq!(tags[5].decl_line, 8);
}

#[test]
fn test_wide_and_narrow_lines_for_separators() {
    let source = read_fixture("bug15890.c");
    let profile = LanguageProfile::c();

    let wide = analyze_source(&source, &options(LineTerminatorPolicy::Wide, profile));
    assert_eq!(
        summary(wide.definitions.tags()),
        vec![
            (SymbolKind::Variable, "alpha".to_string(), 1),
            (SymbolKind::Variable, "beta".to_string(), 2),
            (SymbolKind::Function, "gamma_".to_string(), 3),
            (SymbolKind::Variable, "delta".to_string(), 4),
            (SymbolKind::Function, "epsilon".to_string(), 5),
        ]
    );

    let narrow = analyze_source(&source, &options(LineTerminatorPolicy::Narrow, profile));
    let lines: Vec<usize> = narrow.definitions.tags().iter().map(|d| d.decl_line).collect();
    assert_eq!(lines, vec![1, 1, 1, 1, 1]);
    assert_eq!(narrow.definitions.tags_on_line(1).len(), 5);
    assert_eq!(narrow.lines.count(), 5);
}

#[test]
fn test_references_follow_the_requested_policy() {
    let source = read_fixture("bug15890.c");
    let profile = LanguageProfile::c();

    let wide = analyze_source(&source, &options(LineTerminatorPolicy::Wide, profile))
        .to_document(profile, false);
    let narrow = analyze_source(&source, &options(LineTerminatorPolicy::Narrow, profile))
        .to_document(profile, false);

    let wide_alpha: Vec<usize> = wide
        .references
        .iter()
        .filter(|r| r.symbol == "alpha")
        .map(|r| r.line)
        .collect();
    let narrow_alpha: Vec<usize> = narrow
        .references
        .iter()
        .filter(|r| r.symbol == "alpha")
        .map(|r| r.line)
        .collect();
    assert_eq!(wide_alpha, vec![7]);
    assert_eq!(narrow_alpha, vec![2]);
    assert!(wide.references.iter().all(|r| r.defined_in_file));
    assert_eq!(wide.line_count, 10);
    assert_eq!(narrow.line_count, 5);
}

#[test]
fn test_unterminated_input_still_yields_definitions() {
    let source = read_fixture("unterminated.c");
    let analysis = analyze_source(
        &source,
        &options(LineTerminatorPolicy::Wide, LanguageProfile::c()),
    );
    assert!(analysis.definitions.has_symbol("ok"));
    assert_eq!(analysis.token_diagnostics().count(), 2);
    assert!(analysis
        .token_diagnostics()
        .all(|t| t.diagnostic.is_some_and(Diagnostic::is_unterminated)));
}

#[test]
fn test_invalid_utf8_is_rejected_with_offset() {
    let bytes = b"int x;\n\xff\xfe int y;\n";
    let result = analyze(bytes, &AnalysisOptions::default());
    assert!(matches!(result, Err(AnalysisError::Decode { offset: 7 })));
}
