use tracked_syntax::*;

use super::*;

fn variable(src: &str) -> VariableDecl {
    match parse_decl(src) {
        Ok(Decl::Variable(decl)) => decl,
        other => panic!("expected a variable declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_annotated_variable() {
    let decl = variable(
        "@Tracked(Clamped<Int>.self, config: 0...100) @ObservationIgnored var percent: Int = 150",
    );
    assert_eq!(decl.attributes.len(), 2);
    assert!(decl.attributes[0].is_named("Tracked"));
    assert!(decl.attributes[1].is_named("ObservationIgnored"));
    assert_eq!(decl.attributes[1].arguments, None);
    assert_eq!(decl.binding, BindingKind::Var);
    assert_eq!(decl.bindings.len(), 1);

    let arguments = decl.attributes[0].arguments();
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments[0].label(), None);
    assert_eq!(arguments[0].value.to_string(), "Clamped<Int>.self");
    assert_eq!(
        arguments[0]
            .value
            .as_type_reference()
            .map(|path| path.to_string()),
        Some("Clamped<Int>".to_string())
    );
    assert_eq!(arguments[1].label(), Some("config"));
    assert_eq!(arguments[1].value.to_string(), "0...100");

    let binding = &decl.bindings[0];
    assert_eq!(
        binding.pattern.as_identifier().map(Ident::as_str),
        Some("percent")
    );
    assert_eq!(
        binding.type_annotation.as_ref().map(ToString::to_string),
        Some("Int".to_string())
    );
    assert_eq!(
        binding.initializer.as_ref().map(ToString::to_string),
        Some("150".to_string())
    );
    assert!(binding.accessor_block.is_none());
}

#[test]
fn test_parse_spans_point_into_source() {
    let src = "@Tracked(Box<String>.self) @ObservationIgnored let title: String";
    let decl = variable(src);
    assert_eq!(decl.binding, BindingKind::Let);
    assert_eq!(&src[decl.binding_span.start..decl.binding_span.end], "let");
    let wrapper = &decl.attributes[0].arguments()[0];
    assert_eq!(
        &src[wrapper.span.start..wrapper.span.end],
        "Box<String>.self"
    );
    let companion = &decl.attributes[1];
    assert_eq!(
        &src[companion.span.start..companion.span.end],
        "@ObservationIgnored"
    );
}

#[test]
fn test_parse_optional_types() {
    let decl = variable("var title: String! = \"Hello\"");
    let ty = decl.bindings[0].type_annotation.clone().unwrap();
    assert!(matches!(
        &ty,
        TypeExpr::ImplicitlyUnwrappedOptional(inner) if inner.to_string() == "String"
    ));
    assert_eq!(ty.to_string(), "String!");
    assert_eq!(
        decl.bindings[0].initializer.as_ref().map(ToString::to_string),
        Some("\"Hello\"".to_string())
    );

    let decl = variable("var handler: (() -> Void)? = nil");
    let ty = decl.bindings[0].type_annotation.clone().unwrap();
    assert!(ty.is_optional());
    assert_eq!(ty.to_string(), "(() -> Void)?");

    let decl = variable("var nested: [String: [Int]]?? = nil");
    assert_eq!(
        decl.bindings[0].type_annotation.as_ref().map(ToString::to_string),
        Some("[String: [Int]]??".to_string())
    );
}

#[test]
fn test_parse_multiple_bindings() {
    let decl = variable("@Tracked(Box<Int>.self) var a: Int, b: Int");
    assert_eq!(decl.bindings.len(), 2);
    let second = &decl.bindings[1];
    assert_eq!(second.pattern.as_identifier().map(Ident::as_str), Some("b"));
}

#[test]
fn test_parse_patterns() {
    let decl = variable("var (x, _): (Int, Int) = (1, 2)");
    match &decl.bindings[0].pattern {
        Pattern::Tuple(elements, _) => {
            assert_eq!(elements.len(), 2);
            assert!(matches!(elements[1], Pattern::Wildcard(_)));
        }
        other => panic!("expected a tuple pattern, got {:?}", other),
    }
    assert_eq!(
        decl.bindings[0].type_annotation.as_ref().map(ToString::to_string),
        Some("(Int, Int)".to_string())
    );
}

#[test]
fn test_parse_accessor_blocks() {
    let decl = variable("var count: Int { get { 1 } set(newCount) { print(newCount) } }");
    match decl.bindings[0].accessor_block.as_ref().unwrap() {
        AccessorBlock::Accessors { accessors, .. } => {
            assert_eq!(accessors.len(), 2);
            assert_eq!(accessors[0].kind, AccessorKind::Get);
            assert_eq!(accessors[0].body, vec![Stmt::Verbatim("1".to_string())]);
            assert_eq!(accessors[1].kind, AccessorKind::Set);
            assert_eq!(
                accessors[1].parameter.as_ref().map(Ident::as_str),
                Some("newCount")
            );
        }
        other => panic!("expected explicit accessors, got {:?}", other),
    }

    let decl = variable("var total: Int = 0 { didSet { } }");
    assert!(matches!(
        decl.bindings[0].accessor_block,
        Some(AccessorBlock::Accessors { .. })
    ));

    let decl = variable("var doubled: Int { count * 2 }");
    match decl.bindings[0].accessor_block.as_ref().unwrap() {
        AccessorBlock::Getter { body, .. } => {
            assert_eq!(body, &vec![Stmt::Verbatim("count * 2".to_string())]);
        }
        other => panic!("expected an implicit getter, got {:?}", other),
    }
}

#[test]
fn test_parse_modifiers() {
    let decl = variable("@Tracked(Box.self) public private(set) var title: String");
    let modifiers: Vec<_> = decl.modifiers.iter().map(Ident::as_str).collect();
    assert_eq!(modifiers, vec!["public", "private(set)"]);
}

#[test]
fn test_parse_other_declarations() {
    match parse_decl("@Tracked(Box<Int>.self) static func compute(x: Int) -> Int { x }") {
        Ok(Decl::Other(decl)) => {
            assert_eq!(decl.keyword.as_str(), "func");
            assert_eq!(decl.name.as_ref().map(Ident::as_str), Some("compute"));
            assert_eq!(decl.modifiers.len(), 1);
            assert_eq!(decl.attributes.len(), 1);
        }
        other => panic!("expected a function declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_expressions() {
    let cases = [
        ("var a: Int = -1 + 2 * 3", "-1 + 2 * 3"),
        ("var a: Range<Int> = 0..<count", "0..<count"),
        ("var a: [Int] = [1, 2, 3]", "[1, 2, 3]"),
        ("var a: Bool = x < y && flag", "x < y && flag"),
        ("var a: String = name ?? \"none\"", "name ?? \"none\""),
        ("var a: Item = Item(id: 1, tags: [])", "Item(id: 1, tags: [])"),
        ("var a: Int = Array<Int>().count", "Array<Int>().count"),
        ("var a: Config = .default", ".default"),
        ("var a: Range = .init(lower: 0, upper: 10)", ".init(lower: 0, upper: 10)"),
        ("var a: Int = b ?? .zero", "b ?? .zero"),
        ("var a: [String: Int] = [:]", "[:]"),
        ("var a: [String: Int] = [\"a\": 1, \"b\": 2,]", "[\"a\": 1, \"b\": 2]"),
        ("var a: Int = a < b ? 1 : 2", "a < b ? 1 : 2"),
        ("var a: Int = x ? 1 : y ? 2 : 3", "x ? 1 : y ? 2 : 3"),
        ("var a: [Int] = items.map { $0 * 2 }", "items.map { $0 * 2 }"),
        ("var a: [Int] = items.filter() {}", "items.filter() {}"),
    ];
    for (src, expected) in cases {
        let decl = variable(src);
        assert_eq!(
            decl.bindings[0].initializer.as_ref().map(ToString::to_string),
            Some(expected.to_string()),
            "while parsing {src}"
        );
    }
}

#[test]
fn test_parse_decls_sequence() {
    let decls = parse_decls(
        "@Tracked(Box<String>.self) @ObservationIgnored var title: String\n\
         var count: Int = 0;\n\
         func reset() { count = 0 }",
    )
    .unwrap();
    assert_eq!(decls.len(), 3);
    assert!(decls[0].as_variable().is_some());
    assert!(decls[1].as_variable().is_some());
    assert!(matches!(decls[2], Decl::Other(_)));
}

#[test]
fn test_parse_errors() {
    let errors = parse_decl("var = 1").unwrap_err();
    assert!(!errors.is_empty());
    assert!(parse_decl("var a: Int = #").is_err());
}

#[test]
fn test_parse_ternary_shape() {
    let decl = variable("var a: Int = ready && count > 0 ? count : -1");
    match &decl.bindings[0].initializer.as_ref().unwrap().kind {
        ExprKind::Ternary {
            condition,
            then,
            otherwise,
        } => {
            assert_eq!(condition.to_string(), "ready && count > 0");
            assert_eq!(then.to_string(), "count");
            assert_eq!(otherwise.to_string(), "-1");
        }
        other => panic!("expected a ternary, got {:?}", other),
    }
}

#[test]
fn test_parse_implicit_member_config() {
    let decl = variable("@Tracked(Clamped.self, config: .percentage) @ObservationIgnored var p: Int");
    let config = &decl.attributes[0].arguments()[1];
    assert_eq!(config.label(), Some("config"));
    assert!(matches!(
        &config.value.kind,
        ExprKind::ImplicitMember(name) if name.as_str() == "percentage"
    ));
}

#[test]
fn test_trailing_closure_is_not_an_accessor_block() {
    let src = "var s: Int = x.map { $0 }";
    let decl = variable(src);
    let binding = &decl.bindings[0];
    assert!(binding.accessor_block.is_none());
    let initializer = binding.initializer.as_ref().unwrap();
    assert!(matches!(initializer.kind, ExprKind::TrailingClosure { .. }));
    assert_eq!(
        &src[initializer.span.start..initializer.span.end],
        "x.map { $0 }"
    );

    // Observers after an initializer still form the accessor block.
    for src in [
        "var total: Int = 0 { willSet { print(newValue) } }",
        "var total: Int = compute() { didSet { } }",
    ] {
        let decl = variable(src);
        assert!(
            decl.bindings[0].accessor_block.is_some(),
            "while parsing {src}"
        );
    }
}

#[test]
fn test_accessor_body_keeps_relative_indentation() {
    let decl = variable(
        "var count: Int {\n    get {\n        if items.isEmpty {\n            return 0\n        }\n        return items.count\n    }\n}",
    );
    match decl.bindings[0].accessor_block.as_ref().unwrap() {
        AccessorBlock::Accessors { accessors, .. } => {
            assert_eq!(
                accessors[0].body,
                vec![Stmt::Verbatim(
                    "if items.isEmpty {\n    return 0\n}\nreturn items.count".to_string()
                )]
            );
        }
        other => panic!("expected explicit accessors, got {:?}", other),
    }
}
