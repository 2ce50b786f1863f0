use crate::core::Ctx;

use super::types::Event;

/// Drains every pending platform event and routes each one.
///
/// `pmouse_*` is snapshotted before the first event is applied, so update sees
/// the previous frame's position next to the current one. Returns the number
/// of events delivered.
pub(crate) fn poll_and_dispatch(ctx: &mut Ctx) -> usize {
    ctx.input.begin_frame();
    ctx.platform.pump_events();

    let mut delivered = 0;
    while let Some(event) = ctx.platform.poll_event() {
        dispatch(ctx, &event);
        delivered += 1;
    }
    delivered
}

/// Routes a single event: input state, size readouts, user handler, built-ins.
///
/// Quit handling always runs and runs after the user handler, so user code can
/// react before teardown begins.
pub(crate) fn dispatch(ctx: &mut Ctx, event: &Event) {
    ctx.input.apply_event(event);

    if let Event::Resized { width, height } = event {
        ctx.apply_resize(*width, *height);
    }

    let kind = event.kind();
    if let Some(mut lent) = ctx.handlers.take(kind) {
        (lent.handler)(ctx, event);
        ctx.handlers.restore(kind, lent);
    }

    if let Event::Quit = event {
        log::debug!("quit event received; stopping after this frame");
        ctx.request_quit();
    }
}
