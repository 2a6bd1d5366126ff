use std::cell::RefCell;
use std::rc::Rc;

/// A page behavior bound to its markup. `attach` installs listeners, frame
/// loops and observers; `detach` drops all of them and leaves the markup as is.
pub trait PageComponent {
    fn label(&self) -> &'static str;
    fn attach(self: Rc<Self>);
    fn detach(&self);
}

thread_local! {
    static MOUNTED: RefCell<Vec<Rc<dyn PageComponent>>> = RefCell::new(Vec::new());
}

/// Attaches `component` and keeps it alive until [`unmount_all`].
pub(crate) fn mount(component: Rc<dyn PageComponent>) {
    Rc::clone(&component).attach();
    gloo::console::log!(format!("{}: attached", component.label()));
    MOUNTED.with(|mounted| mounted.borrow_mut().push(component));
}

pub fn mounted_labels() -> Vec<&'static str> {
    MOUNTED.with(|mounted| mounted.borrow().iter().map(|component| component.label()).collect())
}

pub fn unmount_all() {
    let components = MOUNTED.with(|mounted| std::mem::take(&mut *mounted.borrow_mut()));
    for component in components {
        component.detach();
    }
}
