/// Example: Load and render a mesh file in the terminal
///
/// Usage: cargo run --example load_mesh -- path/to/file.mesh

use std::env;
use std::fs;
use std::io;

use sr3d_core::meshfile;
use sr3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <mesh-file>", args[0]);
        eprintln!("\nNo mesh file provided, using the built-in cube...");
        let cube = sr3d_core::Model::cube(2.0);
        let mut app = TerminalApp::new(&cube)?;
        return app.run();
    }

    let path = &args[1];

    println!("Loading mesh file: {}", path);

    let text = fs::read_to_string(path)?;
    let model = meshfile::parse_mesh(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    println!("Loaded {} triangles", model.triangles.len());
    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&model)?;
    app.run()
}
