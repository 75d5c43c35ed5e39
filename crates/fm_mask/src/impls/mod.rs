//! [`Maskable`](crate::Maskable) implementations for std types.
//!
//! ## Implemented Menu
//!
//! - leaves, zeroed from the [`ZeroCache`](crate::ZeroCache):
//!     - `()` `bool` `char`
//!     - `i8`-`i128`, `u8`-`u128`, `isize`, `usize`, `f32`, `f64`
//!     - `String`, `&'static str`, `Cow<'static, str>`
//!     - `Duration`, `PathBuf`, `OsString`
//! - leaves, zeroed as their empty form:
//!     - `Vec<T>`, `VecDeque<T>`, `BinaryHeap<T>`
//!     - `BTreeMap<K, V>`, `BTreeSet<T>`
//!     - std and `hashbrown` `HashMap<K, V, S>`, `HashSet<T, S>`
//!     - `[T; N]`, tuples up to four elements
//!     - `sync::Weak<T>`, `rc::Weak<T>`, `PhantomData<T>`, `Cell<T>`
//! - wrappers, forwarding to the record they contain:
//!     - `Box<T>`, `Arc<T>`, `Rc<T>`
//!     - `Mutex<T>`, `RwLock<T>`, `RefCell<T>`
//!     - `Option<T>`
//!
//! A wrapper over anything but a record (or a cell over a record, for
//! pointers) is itself a leaf.

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod leaf;
mod wrappers;
