use anyhow::Context;
use pdfpane::config::ViewerConfig;
use pdfpane::loader::DocumentLoader;
use pdfpane::locator::Locator;
use pdfpane::pdf::{parser::LopdfEngine, PdfSystem};
use pdfpane::state::State;
use pdfpane::ui::{present, Presentation};
use winit::{
    event::*,
    event_loop::EventLoop,
    window::WindowBuilder,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. Capturar argumentos de lanzamiento (Para "Abrir con...")
    let config = ViewerConfig::from_args(std::env::args().skip(1));
    let locator = config.locator();

    if config.headless {
        let ok = run_headless(locator.as_ref());
        std::process::exit(if ok { 0 } else { 1 });
    }

    run_windowed(&config, locator)
}

/// Carga con el motor en Rust puro e imprime la vista resultante.
fn run_headless(locator: Option<&Locator>) -> bool {
    let engine = LopdfEngine;
    let loader = DocumentLoader::new(&engine, locator);
    let view = present(loader.state());
    println!("{}", view.summary());
    !matches!(view, Presentation::ErrorText { .. })
}

fn run_windowed(config: &ViewerConfig, locator: Option<Locator>) -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("Fallo al crear el event loop")?;
    let window = WindowBuilder::new()
        .with_title(&config.title)
        .with_inner_size(winit::dpi::PhysicalSize::new(config.width, config.height))
        .with_decorations(true)
        .build(&event_loop)
        .context("Fallo al crear la ventana")?;

    // 2. Inicializar sistema PDF en el hilo principal
    // Lo creamos aquí para que viva tanto como la ventana
    let pdf_system = PdfSystem::bind().context("PDFium no disponible (prueba con --headless)")?;

    // 3. El estado arranca en "cargando"; la carga se hace tras el primer frame
    let mut state = pollster::block_on(State::new(&window, &pdf_system, locator))?;
    let mut title = String::new();

    event_loop.run(move |event, elwt| {
        match event {
            Event::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                if !state.input(event) {
                    match event {
                        WindowEvent::CloseRequested
                        | WindowEvent::KeyboardInput {
                            event:
                                KeyEvent {
                                    state: ElementState::Pressed,
                                    physical_key: winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape),
                                    ..
                                },
                            ..
                        } => elwt.exit(),

                        WindowEvent::Resized(physical_size) => {
                            state.resize(*physical_size);
                        }

                        WindowEvent::RedrawRequested => {
                            state.update();
                            match state.render() {
                                Ok(_) => {}
                                Err(wgpu::SurfaceError::Lost) => state.resize(state.size()),
                                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                Err(e) => log::warn!("{:?}", e),
                            }
                            state.poll_load();

                            let next = state.window_title(&config.title);
                            if next != title {
                                window.set_title(&next);
                                title = next;
                            }
                        }
                        _ => {}
                    }
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    Ok(())
}
