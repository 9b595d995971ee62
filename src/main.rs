//! # Labelforge CLI
//!
//! Usage:
//!   labelforge entity.json --template standard-69x25 --format zpl --dpi 300 -o label.zpl
//!   echo '{ ... }' | labelforge --format document
//!   labelforge --example > article.json
//!
//! Formats: `zpl` (printer job), `document` (printable markup), `preview`
//! (JSON preview tree).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use labelforge::template::TemplateRegistry;
use labelforge::{Dpi, LabelEntity};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_article_json());
        return;
    }

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        fs::read_to_string(&args[1]).unwrap_or_else(|e| fail(&format!("read input: {e}")))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| fail(&format!("read stdin: {e}")));
        buf
    };

    let entity: LabelEntity =
        serde_json::from_str(&input).unwrap_or_else(|e| fail(&format!("parse entity: {e}")));

    let flag = |name: &str| {
        args.windows(2)
            .find(|w| w[0] == name)
            .map(|w| w[1].clone())
    };
    let template_id = flag("--template");
    let format = flag("--format").unwrap_or_else(|| "zpl".to_string());
    let dpi = match flag("--dpi") {
        Some(v) => {
            let raw: u32 = v.parse().unwrap_or_else(|_| fail("parse --dpi"));
            Dpi::from_u32(raw).unwrap_or_else(|e| fail(&e.to_string()))
        }
        None => Dpi::D300,
    };

    let registry = TemplateRegistry::with_package();
    let id = template_id.as_deref();

    let output = match format.as_str() {
        "zpl" => labelforge::render_zpl(&registry, id, &entity, dpi)
            .unwrap_or_else(|e| fail(&e.to_string())),
        "document" => labelforge::render_document(&registry, id, std::slice::from_ref(&entity)),
        "preview" => {
            let tree = labelforge::render_preview(&registry, id, &entity)
                .unwrap_or_else(|e| fail(&e.to_string()));
            serde_json::to_string_pretty(&tree).unwrap_or_else(|e| fail(&e.to_string()))
        }
        other => fail(&format!("unknown format: {other}")),
    };

    match flag("-o") {
        Some(path) => {
            fs::write(&path, &output).unwrap_or_else(|e| fail(&format!("write output: {e}")));
            eprintln!("✓ Written {} bytes to {}", output.len(), path);
        }
        None => print!("{output}"),
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("✗ {msg}");
    process::exit(1);
}

fn example_article_json() -> &'static str {
    r#"{
  "type": "article",
  "nombre": "Zapato X",
  "codigo": "ABC123",
  "unidad": "PZA",
  "estatus": "A",
  "fecha": "2024-01-01",
  "precio": 199.99,
  "distribuidor": 149.5,
  "inventarioMaximo": 50
}
"#
}
