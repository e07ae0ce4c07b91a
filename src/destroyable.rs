/// Components that hold channel subscriptions implement this to release them
/// before being dropped, so stale listeners don't keep firing.
pub trait Destroyable {
    fn destroy(&mut self);
}
