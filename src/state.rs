use crate::controller::PageController;

#[derive(Clone)]
pub struct Registry {
    pub controller: PageController,
    /// where the login guard sends anonymous visitors
    pub login_url: String,
}
