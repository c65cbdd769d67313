/// SR3D Terminal Demo - Posed Cubes
///
/// Renders the demo scene (three animated cube instances) or a mesh file
/// given as the first argument.
/// Controls:
///   - Arrow Keys: Move the camera in the view plane
///   - W/S: Dolly the camera forward/back
///   - F: Toggle wireframe
///   - Q/ESC: Quit

use std::env;
use std::fs;
use std::io;

use sr3d_core::{meshfile, Model};
use sr3d_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let model = match env::args().nth(1) {
        Some(path) => {
            let text = fs::read_to_string(&path)?;
            meshfile::parse_mesh(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => Model::cube(2.0),
    };

    println!("Starting terminal renderer (press Q to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(&model)?;
    app.run()
}
