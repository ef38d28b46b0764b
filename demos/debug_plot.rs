//! Streams a noisy sine from a data thread into a dockable debug plot.
//!
//! A second thread stands in for the host's render loop and drains the plot
//! once per tick. Right click the plot to toggle auto scroll.

use std::thread;
use std::time::{Duration, Instant};

use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::EnvFilter;

use gpui_debugplot::{DebugPlot, DebugPlotView, Point, Visualization};

fn spawn_producer(sender: gpui_debugplot::SampleSender) {
    thread::spawn(move || {
        let start = Instant::now();
        let mut tick = 0_u64;
        loop {
            let t = start.elapsed().as_secs_f64();
            let name = if (t as u64 / 10) % 2 == 0 {
                "sine"
            } else {
                "sine (phase 2)"
            };
            let y = (t * 2.0).sin() + 0.1 * ((tick as f64) * 0.37).sin();
            sender.ingest(Point::new(t, y), name);
            tick += 1;
            thread::sleep(Duration::from_millis(2));
        }
    });
}

fn spawn_host_loop(handle: gpui_debugplot::PlotHandle) {
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(16));
            handle.write(|plot| plot.update_main_node());
        }
    });
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(800.0), px(500.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let view = DebugPlotView::new(DebugPlot::new());
            let handle = view.plot_handle();
            let entity = cx.new(|_| view);

            DebugPlotView::spawn_event_pump(entity.clone(), window, cx);
            spawn_producer(handle.sender());
            spawn_host_loop(handle);

            entity
        })
        .expect("open window");
    });
}
