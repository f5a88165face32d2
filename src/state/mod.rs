// ============================================================================
// STATE MODULE - Estado compartido con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;

pub use reactivity::*;
