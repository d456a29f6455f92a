use tracked::prelude::*;
use tracing_subscriber::EnvFilter;

const MODEL: &str = r#"
@Tracked(Clamped<Int>.self, config: 0...100) @ObservationIgnored
var percent: Int = 150

@Tracked(Box<String>.self, projected: true) @ObservationIgnored
public var title: String! = "Hello"

@Tracked(Box.self)
var missingCompanion: Int = 0

func reset() { percent = 0 }
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let decls = match parse_decls(MODEL) {
        Ok(decls) => decls,
        Err(errors) => {
            for error in errors {
                eprintln!("{error}");
            }
            std::process::exit(1);
        }
    };

    let property = TrackedProperty::default();
    for decl in &decls {
        let Some(attribute) = decl.attributes().iter().find(|a| a.is_named("Tracked")) else {
            continue;
        };
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let expansion = property.expand(attribute, decl, &mut diagnostics);

        println!("// {}", decl.sprint().trim_end());
        for diagnostic in &diagnostics {
            println!("// {diagnostic}");
        }
        if !expansion.is_empty() {
            println!("{}", expansion.accessors.sprint());
            println!("{}", expansion.peers.sprint());
        }
    }
}
