use hecs::Entity;

use crate::context::SimContext;

/// Published whenever the ramp geometry is built or rebuilt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleChanged {
    /// Launch angle in degrees, sign preserved.
    pub new_angle: f32,
    /// The ramp entity that produced it.
    pub source: Entity,
}

pub type AngleListener = Box<dyn FnMut(&mut SimContext, &AngleChanged)>;

/// Listeners for [`AngleChanged`], called synchronously in subscription order.
#[derive(Default)]
pub struct AngleListeners {
    listeners: Vec<AngleListener>,
}

impl AngleListeners {
    pub fn subscribe(&mut self, listener: impl FnMut(&mut SimContext, &AngleChanged) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Deliver `event` to every listener registered on `ctx`.
///
/// Listeners get the whole context, so the list is taken out for the
/// duration of the call. Listeners subscribed while publishing are kept and
/// run from the next event on.
pub fn publish_angle(ctx: &mut SimContext, event: AngleChanged) {
    let mut current = std::mem::take(&mut ctx.angle_listeners);
    for listener in current.listeners.iter_mut() {
        listener(ctx, &event);
    }
    let added = std::mem::replace(&mut ctx.angle_listeners, current);
    ctx.angle_listeners.listeners.extend(added.listeners);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn context() -> SimContext {
        let mut world = World::new();
        let root = world.spawn(());
        let ball = world.spawn(());
        let ramp = world.spawn(());
        SimContext::new(world, root, ball, ramp)
    }

    #[test]
    fn listeners_run_in_subscription_order() {
        let mut ctx = context();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for id in 0..3 {
            let seen = Rc::clone(&seen);
            ctx.angle_listeners
                .subscribe(move |_ctx, event| seen.borrow_mut().push((id, event.new_angle)));
        }

        let source = ctx.ramp;
        publish_angle(&mut ctx, AngleChanged { new_angle: 42.0, source });
        assert_eq!(*seen.borrow(), vec![(0, 42.0), (1, 42.0), (2, 42.0)]);
        assert_eq!(ctx.angle_listeners.len(), 3);
    }

    #[test]
    fn listener_can_touch_the_context() {
        let mut ctx = context();
        ctx.angle_listeners.subscribe(|ctx, event| {
            ctx.labels
                .set(crate::ui::Label::Angle, format!("{:.1}", event.new_angle));
        });
        let source = ctx.ramp;
        publish_angle(&mut ctx, AngleChanged { new_angle: -12.5, source });
        assert_eq!(ctx.labels.get(crate::ui::Label::Angle), "-12.5");
    }

    #[test]
    fn subscribing_during_publish_takes_effect_next_time() {
        let mut ctx = context();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        ctx.angle_listeners.subscribe(move |ctx, _| {
            let counter = Rc::clone(&counter);
            ctx.angle_listeners
                .subscribe(move |_, _| *counter.borrow_mut() += 1);
        });

        let source = ctx.ramp;
        publish_angle(&mut ctx, AngleChanged { new_angle: 1.0, source });
        assert_eq!(*calls.borrow(), 0);
        assert_eq!(ctx.angle_listeners.len(), 2);

        publish_angle(&mut ctx, AngleChanged { new_angle: 2.0, source });
        assert_eq!(*calls.borrow(), 1);
    }
}
