use easel_engine::logging::{LoggingConfig, init_logging};
use easel_engine::{Event, EventKind, Key, RuntimeConfig, radians, run_desktop};

/// Frames before the demo closes itself.
const DEMO_FRAMES: u64 = 60 * 40;

fn main() {
    init_logging(LoggingConfig::default());

    let rot_z = 0.0;

    let status = run_desktop(
        RuntimeConfig::default(),
        |ctx| {
            ctx.create_window_3d("easel studio", 1280, 720);
            ctx.set_vsync(false);
            ctx.no_stroke();
            ctx.fill(255);

            ctx.on(EventKind::Key, |ctx, event| {
                if let Event::Key { key: Key::Escape, .. } = event {
                    ctx.request_quit();
                }
            });
        },
        |ctx| {
            if ctx.frame_count() % 60 == 0 {
                log::debug!(
                    "fps {:.1} | delta {:.2} ms | mouse {:.0},{:.0}",
                    ctx.frame_rate(),
                    ctx.frame_delta_ms(),
                    ctx.mouse_x(),
                    ctx.mouse_y()
                );
            }

            ctx.background(200);

            ctx.push();

            let w = ctx.width() as f32;
            let h = ctx.height() as f32;
            let rot_y = ctx.mouse_x() / w * 360.0;
            let rot_x = ctx.mouse_y() / h * 360.0;

            ctx.stroke((ctx.mouse_y() / h * 255.0) as u8);

            ctx.translate(w / 2.0, h / 2.0, 0.0);
            ctx.rotate_x(radians(rot_x));
            ctx.rotate_y(radians(rot_y));
            ctx.rotate_z(radians(rot_z));
            ctx.cube(200.0);

            ctx.pop();

            if ctx.frame_count() == DEMO_FRAMES {
                ctx.request_quit();
            }
        },
    );

    log::info!("exit status {}", status.code());
    std::process::exit(status.code());
}
