use crate::actions::provider::ActionProvider;
use crate::browser::driver::Driver;

/// A typed view of one page, built on top of the action provider.
///
/// ```ignore
/// struct LoginPage<'f, D: Driver> {
///     i: ActionProvider<'f, D>,
/// }
///
/// impl<'f, D: Driver> PageObject<'f, D> for LoginPage<'f, D> {
///     fn attach(i: ActionProvider<'f, D>) -> Self {
///         LoginPage { i }
///     }
/// }
///
/// let page: LoginPage<_> = fixture.page();
/// ```
pub trait PageObject<'f, D: Driver>: Sized {
    fn attach(i: ActionProvider<'f, D>) -> Self;
}
