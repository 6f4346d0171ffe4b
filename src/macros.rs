// ============================================================================
// reactive-mv - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// Binding code constantly moves `Rc` handles into callbacks; this removes
/// the manual clone-block boilerplate.
///
/// # Usage
///
/// ```rust
/// use reactive_mv::{cloned, observable, Observer};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let count = observable(0);
/// let seen = Rc::new(Cell::new(0));
///
/// let o = Observer::new(cloned!(seen => move |v: &i32| seen.set(*v)));
/// count.subscribe(&o);
/// count.set(3);
/// assert_eq!(seen.get(), 3);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}
