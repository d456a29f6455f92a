use tracked_test_utils::expand_source;

#[test]
fn test_non_optional_without_initializer() {
    let expanded = expand_source("@Tracked(Box<String>.self) @ObservationIgnored var title: String");
    assert!(expanded.diagnostics.is_empty());
    insta::assert_snapshot!(expanded.accessors, @r"
    @storageRestrictions(initializes: _title)
    init(initialValue) {
        _title = Box<String>.makeWrapper(from: initialValue)
    }
    get {
        _$observationRegistrar.access(self, keyPath: \.title)
        return _title.wrappedValue
    }
    set {
        let newStorage = Box<String>.makeWrapper(from: newValue)
        _$observationRegistrar.mutate(self, keyPath: \.title, &_title, newStorage, shouldNotifyObservers)
    }
    _modify {
        var value = _title.wrappedValue
        let oldValue = _$observationRegistrar.willModify(self, keyPath: \.title, &value)
        defer {
            let newStorage = Box<String>.makeWrapper(from: value)
            _$observationRegistrar.didModify(self, keyPath: \.title, &value, oldValue, shouldNotifyObservers)
            _title = newStorage
        }
        yield &value
    }
    ");
    assert_eq!(
        expanded.peers,
        "@ObservationIgnored private var _title: Box<String>\n"
    );
}

#[test]
fn test_optional_with_nil_initializer() {
    let expanded =
        expand_source("@Tracked(Box.self) @ObservationIgnored var title: String? = nil");
    assert!(expanded.diagnostics.is_empty());
    assert_eq!(
        expanded.peers,
        "@ObservationIgnored private var _title: Box<String?> = Box<String?>.makeWrapper(from: nil)\n"
    );
}

#[test]
fn test_parameterized_wrapper_used_verbatim() {
    let expanded =
        expand_source("@Tracked(Box<String>.self) @ObservationIgnored var title: String? = nil");
    assert_eq!(
        expanded.peers,
        "@ObservationIgnored private var _title: Box<String> = Box<String>.makeWrapper(from: nil)\n"
    );
}

#[test]
fn test_config_argument_forwarded() {
    let expanded = expand_source(
        "@Tracked(Clamped<Int>.self, config: 0...100) @ObservationIgnored var percent: Int = 150",
    );
    assert!(expanded.diagnostics.is_empty());
    assert_eq!(
        expanded.peers,
        "@ObservationIgnored private var _percent: Clamped<Int> = Clamped<Int>.makeWrapper(from: 150, config: 0...100)\n"
    );
    insta::assert_snapshot!(expanded.accessors, @r"
    @storageRestrictions(initializes: _percent)
    init(initialValue) {
        _percent = Clamped<Int>.makeWrapper(from: initialValue, config: 0...100)
    }
    get {
        _$observationRegistrar.access(self, keyPath: \.percent)
        return _percent.wrappedValue
    }
    set {
        let newStorage = Clamped<Int>.makeWrapper(from: newValue, config: 0...100)
        _$observationRegistrar.mutate(self, keyPath: \.percent, &_percent, newStorage, shouldNotifyObservers)
    }
    _modify {
        var value = _percent.wrappedValue
        let oldValue = _$observationRegistrar.willModify(self, keyPath: \.percent, &value)
        defer {
            let newStorage = Clamped<Int>.makeWrapper(from: value, config: 0...100)
            _$observationRegistrar.didModify(self, keyPath: \.percent, &value, oldValue, shouldNotifyObservers)
            _percent = newStorage
        }
        yield &value
    }
    ");
}

#[test]
fn test_projection_with_unwrapped_optional() {
    let expanded = expand_source(
        "@Tracked(Box<String>.self, projected: true) @ObservationIgnored var title: String! = \"Hello\"",
    );
    assert!(expanded.diagnostics.is_empty());
    insta::assert_snapshot!(expanded.peers, @r#"
    @ObservationIgnored private var _title: Box<String> = Box<String>.makeWrapper(from: "Hello")
    var $title: Box<String>.ProjectedValue {
        get {
            _$observationRegistrar.access(self, keyPath: \.title)
            return _title.projectedValue
        }
        set {
            var newStorage = _title
            newStorage.projectedValue = newValue
            _$observationRegistrar.mutate(self, keyPath: \.title, &_title, newStorage, shouldNotifyObservers)
        }
    }
    "#);
}

#[test]
fn test_projection_copies_access_and_type_modifiers() {
    let expanded = expand_source(
        "@Tracked(Box.self, projected: true) @ObservationIgnored public private(set) static var count: Int = 0",
    );
    let mut lines = expanded.peers.lines();
    assert_eq!(
        lines.next(),
        Some("@ObservationIgnored private static var _count: Box<Int> = Box<Int>.makeWrapper(from: 0)")
    );
    assert_eq!(
        lines.next(),
        Some("public private(set) static var $count: Box<Int>.ProjectedValue {")
    );
}

#[test]
fn test_class_property_keeps_type_level_storage() {
    let expanded =
        expand_source("@Tracked(Box.self) @ObservationIgnored class var limit: Int = 10");
    assert!(expanded.diagnostics.is_empty());
    assert_eq!(
        expanded.peers,
        "@ObservationIgnored private static var _limit: Box<Int> = Box<Int>.makeWrapper(from: 10)\n"
    );
}

#[test]
fn test_multiple_bindings_rejected_by_both_requests() {
    let expanded = expand_source("@Tracked(Box<Int>.self) @ObservationIgnored var a: Int, b: Int");
    assert_eq!(expanded.accessors, "");
    assert_eq!(expanded.peers, "");
    assert_eq!(
        expanded.diagnostic_ids(),
        vec!["tracked.multiple-bindings", "tracked.multiple-bindings"]
    );
}
