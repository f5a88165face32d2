// ============================================================================
// REACTIVITY - Valor compartido + subscribers
// ============================================================================
// Todos los clones apuntan al mismo valor y a la misma lista de subscribers:
// una escritura por cualquier handle es visible para todos antes de que
// `set` retorne. Los callbacks reciben una copia del valor, así que pueden
// volver a escribir en el mismo estado.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(&T)>;

pub struct ReactiveState<T> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Vec<Callback<T>>>>,
}

impl<T: Clone> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut *self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&T) + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn notify(&self) {
        // Ningún borrow queda abierto mientras corren los callbacks
        let callbacks: Vec<Callback<T>> = self.subscribers.borrow().clone();
        let value = self.get();
        for callback in callbacks {
            callback(&value);
        }
    }
}

impl<T> Clone for ReactiveState<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            subscribers: self.subscribers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_clones_share_value() {
        let state = ReactiveState::new(1);
        let other = state.clone();
        other.set(5);
        assert_eq!(state.get(), 5);
        state.update(|v| *v += 1);
        assert_eq!(other.get(), 6);
    }

    #[test]
    fn test_subscribers_see_new_value() {
        let state = ReactiveState::new(String::from("en"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        state.subscribe(move |v: &String| sink.borrow_mut().push(v.clone()));

        state.clone().set("zh".to_string());
        state.set("en".to_string());
        assert_eq!(*seen.borrow(), vec!["zh".to_string(), "en".to_string()]);
    }

    #[test]
    fn test_subscriber_may_read_state() {
        let state = ReactiveState::new(0u32);
        let reader = state.clone();
        let observed = Rc::new(Cell::new(0));
        let out = observed.clone();
        state.subscribe(move |_| out.set(reader.get()));
        state.set(9);
        assert_eq!(observed.get(), 9);
        assert_eq!(state.subscriber_count(), 1);
    }

    #[test]
    fn test_subscriber_may_write_back_into_state() {
        let state = ReactiveState::new(0u32);
        let writer = state.clone();
        state.subscribe(move |v| {
            if *v > 100 {
                writer.set(100);
            }
        });

        state.set(500);
        assert_eq!(state.get(), 100);

        state.update(|v| *v = 250);
        assert_eq!(state.get(), 100);
    }
}
