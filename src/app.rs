use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::controller::PuzzleController;
use crate::cube_pass::CubePass;
use crate::gpu::{GpuContext, GpuError};
use crate::input::Input;
use crate::texture::Texture;

/// Configuration for the app window.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Optional sticker image drawn on every cubie face.
    pub texture: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "cubeturn".to_string(),
            width: 800,
            height: 800,
            texture: None,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture = Some(path.into());
        self
    }
}

/// Errors that end the application before or while the event loop runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create the window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Gpu(#[from] GpuError),
}

/// Open a window and run the puzzle until it is closed.
///
/// # Example
/// ```no_run
/// use cubeturn::{AppConfig, PuzzleConfig, PuzzleController};
///
/// let puzzle = PuzzleController::new(PuzzleConfig::new().turn_speed(6.0));
/// cubeturn::run(AppConfig::new().title("Cube"), puzzle).unwrap();
/// ```
pub fn run(config: AppConfig, puzzle: PuzzleController) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = CubeApp::Pending {
        config,
        puzzle: Some(puzzle),
    };
    event_loop.run_app(&mut app)?;

    match app {
        CubeApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

enum CubeApp {
    Pending {
        config: AppConfig,
        puzzle: Option<PuzzleController>,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        cube_pass: CubePass,
        puzzle: PuzzleController,
        input: Input,
        last_frame: Instant,
    },
    Failed(AppError),
}

impl CubeApp {
    fn start(
        event_loop: &ActiveEventLoop,
        config: &AppConfig,
        puzzle: PuzzleController,
    ) -> Result<CubeApp, AppError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;

        let sticker = config
            .texture
            .as_deref()
            .and_then(|path| match Texture::from_file(&gpu, path) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "could not load sticker texture, using plain colors");
                    None
                }
            });
        let cube_pass = CubePass::new(&gpu, sticker);

        tracing::info!(
            width = gpu.width(),
            height = gpu.height(),
            controls = %puzzle.control_summary(),
            "puzzle ready"
        );

        Ok(CubeApp::Running {
            window,
            gpu,
            cube_pass,
            puzzle,
            input: Input::new(),
            last_frame: Instant::now(),
        })
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let CubeApp::Pending { config, puzzle } = self else {
            return;
        };
        let Some(puzzle) = puzzle.take() else {
            return;
        };

        *self = match CubeApp::start(event_loop, config, puzzle) {
            Ok(running) => running,
            Err(err) => {
                tracing::error!(%err, "startup failed");
                event_loop.exit();
                CubeApp::Failed(err)
            }
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let CubeApp::Running {
            window,
            gpu,
            cube_pass,
            puzzle,
            input,
            last_frame,
        } = self
        else {
            return;
        };

        input.handle_event(&event, puzzle);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;

                puzzle.advance(dt);
                render_frame(gpu, cube_pass, puzzle);

                window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Draw the puzzle to the window surface.
///
/// A lost or outdated surface is reconfigured and the frame skipped.
fn render_frame(gpu: &GpuContext, cube_pass: &mut CubePass, puzzle: &PuzzleController) {
    let output = match gpu.surface.get_current_texture() {
        Ok(output) => output,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            tracing::debug!("surface lost or outdated, reconfiguring");
            gpu.reconfigure();
            return;
        }
        Err(wgpu::SurfaceError::Timeout) => {
            tracing::warn!("timed out waiting for the next surface texture");
            return;
        }
        Err(err) => {
            tracing::error!(%err, "failed to acquire surface texture");
            return;
        }
    };
    let view = output
        .texture
        .create_view(&wgpu::TextureViewDescriptor::default());

    cube_pass.render(
        gpu,
        &view,
        puzzle.camera(),
        puzzle.orientation().rotation_matrix(),
        puzzle.cubie_transforms(),
    );

    output.present();
}
