//! Composite a safety warning onto an exported SVG view.

use std::fs;

use cadnote::{add_safety_warning, WarningOptions};

fn main() {
    env_logger::init();

    // Stand-in for an exported projection of a model.
    let path = std::env::temp_dir().join("cadnote_safety_warning_example.svg");
    fs::write(
        &path,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800.0px" height="600.0px">"#,
            r#"<rect x="100" y="100" width="600" height="400" fill="none" stroke="black"/>"#,
            "</svg>"
        ),
    )
    .unwrap();

    add_safety_warning(&path, "Mains voltage inside", &WarningOptions::default()).unwrap();

    println!("annotated {}", path.display());
}
