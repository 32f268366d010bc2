use std::cell::Cell;
use std::rc::Rc;

use alloc::boxed::Box;

use crate::Handle;

/// A handle to a heap allocated slot, counting how many times it has been
/// released.
fn counted(released: &Rc<Cell<usize>>) -> Handle<*mut u32> {
    let released = released.clone();
    let raw = Box::into_raw(Box::new(42u32));

    Handle::new(raw, move |raw| {
        drop(unsafe { Box::from_raw(raw) });
        released.set(released.get() + 1);
    })
}

#[test]
fn release_on_drop() {
    let released = Rc::new(Cell::new(0));

    let handle = counted(&released);
    assert!(!handle.is_invalid());
    assert_eq!(unsafe { *handle.get() }, 42);
    drop(handle);

    assert_eq!(released.get(), 1);
}

#[test]
fn release_explicitly() {
    let released = Rc::new(Cell::new(0));

    let mut handle = counted(&released);
    assert!(handle.release());
    assert!(handle.is_invalid());
    assert!(!handle.release());
    drop(handle);

    assert_eq!(released.get(), 1);
}

#[test]
fn move_releases_once() {
    let released = Rc::new(Cell::new(0));

    let a = counted(&released);
    let raw = a.get();
    let b = a;
    assert_eq!(b.get(), raw);
    assert_eq!(released.get(), 0);
    drop(b);

    assert_eq!(released.get(), 1);
}

#[test]
fn take_leaves_source_empty() {
    let released = Rc::new(Cell::new(0));

    let mut a = counted(&released);
    let raw = a.get();
    let b = a.take();

    assert!(a.is_invalid());
    assert_eq!(b.get(), raw);

    drop(a);
    assert_eq!(released.get(), 0);
    drop(b);
    assert_eq!(released.get(), 1);
}

#[test]
fn replace_releases_previous() {
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let mut a = counted(&first);
    let b = counted(&second);
    let raw = b.get();

    a.replace(b);
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 0);
    assert_eq!(a.get(), raw);

    drop(a);
    assert_eq!(first.get(), 1);
    assert_eq!(second.get(), 1);
}

#[test]
fn replace_with_empty() {
    let released = Rc::new(Cell::new(0));

    let mut a = counted(&released);
    a.replace(Handle::empty());
    assert_eq!(released.get(), 1);
    assert!(a.is_invalid());
    assert!(!a.release());

    drop(a);
    assert_eq!(released.get(), 1);
}

#[test]
fn reset_forgets_resource() {
    let released = Rc::new(Cell::new(0));
    let slot = Box::into_raw(Box::new(7u32));

    let counter = released.clone();
    let mut handle = Handle::new(slot, move |_| counter.set(counter.get() + 1));
    handle.reset();
    assert!(handle.is_invalid());
    drop(handle);

    assert_eq!(released.get(), 0);
    drop(unsafe { Box::from_raw(slot) });
}

#[test]
fn fill_through_pointer() {
    let released = Rc::new(Cell::new(0));

    let counter = released.clone();
    let mut handle = Handle::<*mut u32>::new(core::ptr::null_mut(), move |raw| {
        drop(unsafe { Box::from_raw(raw) });
        counter.set(counter.get() + 1);
    });

    assert!(handle.is_invalid());

    unsafe {
        handle.as_mut_ptr().write(Box::into_raw(Box::new(1u32)));
    }

    assert!(!handle.is_invalid());
    drop(handle);
    assert_eq!(released.get(), 1);
}

#[test]
fn invalid_never_released() {
    let released = Rc::new(Cell::new(0));

    let counter = released.clone();
    let handle = Handle::<*mut u32>::new(core::ptr::null_mut(), move |_| {
        counter.set(counter.get() + 1)
    });

    drop(handle);
    assert_eq!(released.get(), 0);

    let handle = Handle::<*const u8>::default();
    assert!(handle.is_invalid());
}
