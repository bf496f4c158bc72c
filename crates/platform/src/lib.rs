use std::sync::Arc;
use std::time::Instant;

use gfx::Renderer;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{StartCause, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod demo;

pub use demo::Demo;

pub fn run() {
    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = PlatformApp {
        window: None,
        renderer: None,
        demo: Demo::new().expect("demo form"),
    };
    event_loop.run_app(&mut app).expect("Event loop crashed");
}

struct PlatformApp {
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    demo: Demo,
}

impl PlatformApp {
    fn schedule(&self, event_loop: &ActiveEventLoop, delay: Option<std::time::Duration>) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        match delay {
            Some(delay) if delay.is_zero() => window.request_redraw(),
            Some(delay) => match Instant::now().checked_add(delay) {
                Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
                None => event_loop.set_control_flow(ControlFlow::Wait),
            },
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

impl ApplicationHandler for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title("taglist")
            .with_inner_size(LogicalSize::new(640.0, 420.0));
        let window = Arc::new(event_loop.create_window(attributes).expect("create window"));
        self.renderer = Some(Renderer::new(Arc::clone(&window)));
        window.request_redraw();
        self.window = Some(window);
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(window) = self.window.as_ref()
        {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return;
        };
        let repaint = renderer.on_window_event(window, &event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }
            WindowEvent::Resized(new_size) => {
                renderer.resize(new_size);
            }
            WindowEvent::RedrawRequested => {
                let demo = &mut self.demo;
                let delay = renderer.render(window, |ctx| demo.ui(ctx));
                self.schedule(event_loop, delay);
                return;
            }
            _ => {}
        }
        if repaint {
            window.request_redraw();
        }
    }
}
