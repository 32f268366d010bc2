use core::fmt;
use core::mem;
use core::ptr;

use alloc::boxed::Box;

/// A raw handle type which has a designated value meaning "no resource".
///
/// This is implemented for raw pointers, where the invalid value is null.
pub trait Invalid: Copy + PartialEq {
    /// The value representing the absence of a resource.
    const INVALID: Self;
}

impl<T> Invalid for *mut T {
    const INVALID: Self = ptr::null_mut();
}

impl<T> Invalid for *const T {
    const INVALID: Self = ptr::null();
}

type ReleaseFn<T> = Box<dyn FnMut(T)>;

/// A single owner of a raw resource handle together with the routine which
/// releases it.
///
/// The release routine runs exactly once, either through an explicit call to
/// [`release`] or when the handle is dropped. Handles cannot be cloned, and
/// transferring ownership through [`take`] or [`replace`] leaves the source
/// empty so the resource is never released twice.
///
/// Release routines must not panic since they run from [`Drop`].
///
/// [`release`]: Self::release
/// [`take`]: Self::take
/// [`replace`]: Self::replace
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use sqlbind::Handle;
///
/// let released = Rc::new(Cell::new(0));
/// let mut value = 42u32;
///
/// let counter = released.clone();
/// let handle = Handle::new(&mut value as *mut u32, move |_| counter.set(counter.get() + 1));
///
/// let moved = handle;
/// assert_eq!(released.get(), 0);
/// drop(moved);
/// assert_eq!(released.get(), 1);
/// ```
pub struct Handle<T>
where
    T: Invalid,
{
    raw: T,
    release: Option<ReleaseFn<T>>,
}

impl<T> Handle<T>
where
    T: Invalid,
{
    /// Take ownership of `raw`, arming `release` to be called when the
    /// resource is released.
    ///
    /// `raw` may still be [`Invalid::INVALID`] when the handle is meant to be
    /// filled in through [`as_mut_ptr`]. The release routine is only ever
    /// called with a valid value.
    ///
    /// [`as_mut_ptr`]: Self::as_mut_ptr
    pub fn new<F>(raw: T, release: F) -> Self
    where
        F: FnMut(T) + 'static,
    {
        Self {
            raw,
            release: Some(Box::new(release)),
        }
    }

    /// Construct a handle which owns nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlbind::Handle;
    ///
    /// let mut handle = Handle::<*mut u8>::empty();
    /// assert!(handle.is_invalid());
    /// assert!(!handle.release());
    /// ```
    #[inline]
    pub const fn empty() -> Self {
        Self {
            raw: T::INVALID,
            release: None,
        }
    }

    /// Return the raw handle without transferring ownership.
    #[inline]
    pub fn get(&self) -> T {
        self.raw
    }

    /// Test if the handle currently holds the invalid value.
    #[inline]
    pub fn is_invalid(&self) -> bool {
        self.raw == T::INVALID
    }

    /// Return a pointer to the storage of the raw handle.
    ///
    /// This is used to let an initialization routine write the raw value
    /// directly into storage which already has its release routine armed, so
    /// that even a partially successful initialization is cleaned up.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// use sqlbind::Handle;
    ///
    /// let released = Rc::new(Cell::new(0));
    /// let mut value = 42u32;
    ///
    /// let counter = released.clone();
    /// let mut handle = Handle::<*mut u32>::new(core::ptr::null_mut(), move |_| counter.set(counter.get() + 1));
    ///
    /// unsafe {
    ///     handle.as_mut_ptr().write(&mut value as *mut u32);
    /// }
    ///
    /// assert!(!handle.is_invalid());
    /// drop(handle);
    /// assert_eq!(released.get(), 1);
    /// ```
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        &mut self.raw
    }

    /// Release the owned resource if there is one.
    ///
    /// Returns `true` if the release routine was called. Afterwards the handle
    /// is empty.
    pub fn release(&mut self) -> bool {
        if self.raw != T::INVALID
            && let Some(release) = self.release.as_mut()
        {
            release(self.raw);
            self.reset();
            return true;
        }

        false
    }

    /// Forget the owned resource and release routine without calling it.
    #[inline]
    pub fn reset(&mut self) {
        self.raw = T::INVALID;
        self.release = None;
    }

    /// Move the owned resource into a new handle, leaving this one empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cell::Cell;
    /// use std::rc::Rc;
    ///
    /// use sqlbind::Handle;
    ///
    /// let released = Rc::new(Cell::new(0));
    /// let mut value = 42u32;
    ///
    /// let counter = released.clone();
    /// let mut a = Handle::new(&mut value as *mut u32, move |_| counter.set(counter.get() + 1));
    /// let b = a.take();
    ///
    /// assert!(a.is_invalid());
    /// drop(a);
    /// assert_eq!(released.get(), 0);
    /// drop(b);
    /// assert_eq!(released.get(), 1);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::empty())
    }

    /// Release the currently owned resource, then take ownership of the
    /// resource held by `other`.
    pub fn replace(&mut self, mut other: Self) {
        self.release();
        self.raw = other.raw;
        self.release = other.release.take();
        other.reset();
    }
}

impl<T> Default for Handle<T>
where
    T: Invalid,
{
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for Handle<T>
where
    T: Invalid,
{
    #[inline]
    fn drop(&mut self) {
        if !self.release() {
            self.reset();
        }
    }
}

impl<T> fmt::Debug for Handle<T>
where
    T: Invalid + fmt::Debug,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("raw", &self.raw)
            .field("armed", &self.release.is_some())
            .finish()
    }
}
