/// Terminal frontend for the SR3D software rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::{Point3, Vector3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use sr3d_core::{transform::rotation_about_axis, Canvas, Model, ModelInstance};

pub mod screen;

/// Interactive terminal application around the demo scene: three posed
/// instances of one model under a fixed-orientation camera.
pub struct TerminalApp<'a> {
    canvas: Canvas,
    instances: Vec<ModelInstance<'a>>,
    camera_position: Point3<f32>,
    wireframe: bool,
    running: bool,
    bob_phase: f32,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl<'a> TerminalApp<'a> {
    pub fn new(model: &'a Model) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut canvas = Canvas::new("SR3D Terminal Renderer", width as usize, height as usize);

        let camera_position = Point3::new(-3.0, 1.0, 2.0);
        canvas.set_camera_position(camera_position);
        canvas.set_camera_orientation(rotation_about_axis(30.0, Vector3::y()));

        let mut tumbling = ModelInstance::new(model, Vector3::new(-1.5, 0.0, 7.0));
        tumbling.set_scale(0.75);

        let mut spinning = ModelInstance::new(model, Vector3::new(1.25, 2.5, 7.5));
        spinning.set_rotation(195.0, Vector3::y());

        let resting = ModelInstance::new(model, Vector3::new(-1.5, 1.0, 0.0));

        Ok(Self {
            canvas,
            instances: vec![tumbling, spinning, resting],
            camera_position,
            wireframe: false,
            running: true,
            bob_phase: 0.0,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('f') => {
                    self.wireframe = !self.wireframe;
                }
                KeyCode::Left => self.move_camera(-0.25, 0.0, 0.0),
                KeyCode::Right => self.move_camera(0.25, 0.0, 0.0),
                KeyCode::Up => self.move_camera(0.0, 0.25, 0.0),
                KeyCode::Down => self.move_camera(0.0, -0.25, 0.0),
                KeyCode::Char('w') => self.move_camera(0.0, 0.0, 0.25),
                KeyCode::Char('s') => self.move_camera(0.0, 0.0, -0.25),
                _ => {}
            }
        }
        Ok(())
    }

    fn move_camera(&mut self, dx: f32, dy: f32, dz: f32) {
        self.camera_position += Vector3::new(dx, dy, dz);
        self.canvas.set_camera_position(self.camera_position);
    }

    fn update(&mut self) {
        self.bob_phase += 0.25;

        let tumble = self.instances[0].rotation_angle() + 2.0;
        self.instances[0].set_rotation(tumble, Vector3::new(1.0, 1.0, 1.0));
        self.instances[0].set_translation(Vector3::new(-1.5, self.bob_phase.sin() / 2.0, 7.0));

        let spin = self.instances[1].rotation_angle() + 2.0;
        self.instances[1].set_rotation(spin, Vector3::z());
    }

    fn render(&mut self) -> io::Result<()> {
        self.canvas.clear();

        for instance in &self.instances {
            if self.wireframe {
                self.canvas.draw_wireframe_model(instance);
            } else {
                self.canvas.draw_simple_model(instance);
            }
        }

        let mut stdout = stdout();
        screen::present(&self.canvas, &mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "{} | FPS: {:.1} | Controls: Arrows/W/S=Move F=Wireframe Q=Quit",
                self.canvas.title(),
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
