//! Builds the emitted accessors and peer declarations.
//!
//! Every builder returns fresh syntax nodes with default spans. Given the same
//! facts and configuration the output is structurally identical.

use tracked_syntax::{
    Accessor, AccessorBlock, AccessorKind, Argument, Attribute, BindingKind, Decl, Expr, Ident,
    PatternBinding, Stmt, TypeExpr, TypePath, VariableDecl,
};

use crate::Config;
use crate::inspect::Facts;
use crate::resolve::ResolvedConfiguration;

/// Equality check passed to the registrar's `mutate` and `didModify`.
const EQUALITY_CHECK: &str = "shouldNotifyObservers";

/// The complete output for one eligible declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionPlan {
    pub storage_name: String,
    /// `\.name`
    pub key_reference: Expr,
    pub storage_type: TypeExpr,
    /// Factory call that builds the initial storage, when the storage has
    /// an initializer.
    pub initial_storage: Option<Expr>,
    /// `init`, `get`, `set` and `_modify`, in that order.
    pub accessors: Vec<Accessor>,
    pub storage: Decl,
    pub projection: Option<Decl>,
}

impl EmissionPlan {
    /// Peer declarations in emission order: storage first, then the
    /// projection if requested.
    pub fn peers(&self) -> Vec<Decl> {
        std::iter::once(self.storage.clone())
            .chain(self.projection.clone())
            .collect()
    }

    pub fn into_parts(self) -> (Vec<Accessor>, Vec<Decl>) {
        let peers = std::iter::once(self.storage)
            .chain(self.projection)
            .collect();
        (self.accessors, peers)
    }
}

/// Names and expressions shared by every emitted fragment.
struct Emitter<'a> {
    config: &'a Config,
    name: &'a str,
    storage_name: String,
    storage_type: TypePath,
    config_expression: Option<&'a Expr>,
    type_modifier: Option<&'a Ident>,
}

impl Emitter<'_> {
    fn registrar(&self, method: &str, arguments: Vec<Argument>) -> Expr {
        Expr::ident(self.config.registrar.clone())
            .member(method)
            .call(arguments)
    }

    fn owner_and_key(&self) -> [Argument; 2] {
        [
            Argument::unlabeled(Expr::ident("self")),
            Argument::labeled("keyPath", Expr::key_path(self.name)),
        ]
    }

    fn storage(&self) -> Expr {
        Expr::ident(self.storage_name.clone())
    }

    /// `Storage.makeWrapper(from: value, config: ...)`
    fn make_wrapper(&self, value: Expr) -> Expr {
        let mut arguments = vec![Argument::labeled("from", value)];
        if let Some(config) = self.config_expression {
            arguments.push(Argument::labeled("config", config.clone()));
        }
        Expr::ty(self.storage_type.clone())
            .member("makeWrapper")
            .call(arguments)
    }

    /// `registrar.access(self, keyPath: \.name)`
    fn access(&self) -> Stmt {
        Stmt::Expr(self.registrar("access", self.owner_and_key().to_vec()))
    }

    /// `registrar.mutate(self, keyPath: \.name, &storage, newStorage, check)`
    fn mutate(&self) -> Stmt {
        let mut arguments = self.owner_and_key().to_vec();
        arguments.extend([
            Argument::unlabeled(self.storage().in_out()),
            Argument::unlabeled(Expr::ident("newStorage")),
            Argument::unlabeled(Expr::ident(EQUALITY_CHECK)),
        ]);
        Stmt::Expr(self.registrar("mutate", arguments))
    }

    fn init_accessor(&self) -> Accessor {
        Accessor::new(
            AccessorKind::Init,
            vec![Stmt::Assign {
                target: self.storage(),
                value: self.make_wrapper(Expr::ident("initialValue")),
            }],
        )
        .with_attribute(
            Attribute::new("storageRestrictions").with_arguments(vec![Argument::labeled(
                "initializes",
                self.storage(),
            )]),
        )
        .with_parameter("initialValue")
    }

    fn get_accessor(&self) -> Accessor {
        Accessor::new(
            AccessorKind::Get,
            vec![
                self.access(),
                Stmt::Return(self.storage().member("wrappedValue")),
            ],
        )
    }

    fn set_accessor(&self) -> Accessor {
        Accessor::new(
            AccessorKind::Set,
            vec![
                Stmt::Let {
                    name: "newStorage".to_string(),
                    value: self.make_wrapper(Expr::ident("newValue")),
                },
                self.mutate(),
            ],
        )
    }

    /// The scope-exit block rebuilds the storage from the mutated local, so
    /// the wrapper's invariants hold after in-place edits too.
    fn modify_accessor(&self) -> Accessor {
        let value = || Expr::ident("value");

        let mut will_modify = self.owner_and_key().to_vec();
        will_modify.push(Argument::unlabeled(value().in_out()));

        let mut did_modify = self.owner_and_key().to_vec();
        did_modify.extend([
            Argument::unlabeled(value().in_out()),
            Argument::unlabeled(Expr::ident("oldValue")),
            Argument::unlabeled(Expr::ident(EQUALITY_CHECK)),
        ]);

        Accessor::new(
            AccessorKind::Modify,
            vec![
                Stmt::Var {
                    name: "value".to_string(),
                    value: self.storage().member("wrappedValue"),
                },
                Stmt::Let {
                    name: "oldValue".to_string(),
                    value: self.registrar("willModify", will_modify),
                },
                Stmt::Defer(vec![
                    Stmt::Let {
                        name: "newStorage".to_string(),
                        value: self.make_wrapper(value()),
                    },
                    Stmt::Expr(self.registrar("didModify", did_modify)),
                    Stmt::Assign {
                        target: self.storage(),
                        value: Expr::ident("newStorage"),
                    },
                ]),
                Stmt::Yield(value().in_out()),
            ],
        )
    }

    fn storage_decl(&self, initial_storage: Option<Expr>) -> Decl {
        let mut binding =
            PatternBinding::new(self.storage_name.clone(), self.storage_type.clone().into());
        binding.initializer = initial_storage;
        let mut modifiers = vec![Ident::new("private")];
        // Stored type properties are always `static`, even next to a `class var`.
        if self.type_modifier.is_some() {
            modifiers.push(Ident::new("static"));
        }
        Decl::Variable(VariableDecl {
            attributes: vec![Attribute::new(self.config.companion.clone())],
            modifiers,
            ..VariableDecl::new(BindingKind::Var, vec![binding])
        })
    }

    fn projection_decl(&self, access_modifiers: &[&Ident]) -> Decl {
        let getter = Accessor::new(
            AccessorKind::Get,
            vec![
                self.access(),
                Stmt::Return(self.storage().member("projectedValue")),
            ],
        );
        let setter = Accessor::new(
            AccessorKind::Set,
            vec![
                Stmt::Var {
                    name: "newStorage".to_string(),
                    value: self.storage(),
                },
                Stmt::Assign {
                    target: Expr::ident("newStorage").member("projectedValue"),
                    value: Expr::ident("newValue"),
                },
                self.mutate(),
            ],
        );

        let ty = self.storage_type.clone().member("ProjectedValue");
        let binding = PatternBinding::new(self.config.projection_name(self.name), ty.into())
            .with_accessor_block(AccessorBlock::accessors(vec![getter, setter]));
        Decl::Variable(VariableDecl {
            modifiers: access_modifiers
                .iter()
                .copied()
                .chain(self.type_modifier)
                .cloned()
                .collect(),
            ..VariableDecl::new(BindingKind::Var, vec![binding])
        })
    }
}

/// The wrapper as written if it already carries type parameters, otherwise
/// `Wrapper<Value>` with the normalized value type.
pub fn storage_type(wrapper: &TypePath, declared_type: &TypeExpr) -> TypePath {
    if wrapper.has_generic_args() {
        wrapper.clone()
    } else {
        wrapper.clone().with_generic_arg(declared_type.normalized())
    }
}

/// Builds the [`EmissionPlan`] for a validated declaration.
pub fn synthesize(
    config: &Config,
    facts: &Facts<'_>,
    resolved: &ResolvedConfiguration,
) -> EmissionPlan {
    let name = facts.name.as_str();
    let emitter = Emitter {
        config,
        name,
        storage_name: config.storage_name(name),
        storage_type: storage_type(&resolved.wrapper_type, facts.declared_type),
        config_expression: resolved.config_expression.as_ref(),
        type_modifier: facts.type_modifier,
    };

    let initial_storage = (resolved.has_explicit_initializer || resolved.is_optional_value)
        .then(|| emitter.make_wrapper(facts.initializer.cloned().unwrap_or_else(Expr::nil)));

    let accessors = vec![
        emitter.init_accessor(),
        emitter.get_accessor(),
        emitter.set_accessor(),
        emitter.modify_accessor(),
    ];
    let storage = emitter.storage_decl(initial_storage.clone());
    let projection = resolved
        .emit_projection
        .then(|| emitter.projection_decl(&facts.access_modifiers));

    EmissionPlan {
        storage_name: emitter.storage_name.clone(),
        key_reference: Expr::key_path(name),
        storage_type: emitter.storage_type.clone().into(),
        initial_storage,
        accessors,
        storage,
        projection,
    }
}
