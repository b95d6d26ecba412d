//! Login surface.

use std::sync::Arc;
use std::time::Duration;

use recipes_core::{
    Authenticator, Identity, LoginError, LoginForm, Session, SessionGate, SessionStore, Surface,
    ValidationError,
};
use tracing::{info, warn};

use super::PageModel;
use crate::components::{EchoMode, TextInput, boxed, center};
use crate::messages::{AppMsg, LoginMsg, Notice};
use crate::runtime::{Cmd, KeyMsg, KeyType, Message, quit, tick};
use crate::theme::{Theme, spacing};

/// Shown when the recipes surface is requested without a session.
pub const REDIRECT_NOTICE: &str = "You must be logged in to view this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Username,
    Password,
}

/// Username/password form.
pub struct LoginPage {
    username: TextInput,
    password: TextInput,
    focus: Field,
    form: LoginForm,
    notice: Option<Notice>,
    redirecting: bool,
    auth: Arc<dyn Authenticator + Send + Sync>,
    gate: SessionGate<dyn SessionStore>,
    redirect_delay: Duration,
}

impl LoginPage {
    /// Login surface backed by `auth`, persisting through `gate`.
    pub fn new(
        auth: Arc<dyn Authenticator + Send + Sync>,
        gate: SessionGate<dyn SessionStore>,
        redirect_delay: Duration,
    ) -> Self {
        let mut username = TextInput::new("Username");
        username.set_placeholder("e.g. emilys");
        username.set_char_limit(64);
        let mut password = TextInput::new("Password");
        password.set_echo_mode(EchoMode::Password);
        password.set_char_limit(128);
        Self {
            username,
            password,
            focus: Field::Username,
            form: LoginForm::new(),
            notice: None,
            redirecting: false,
            auth,
            gate,
            redirect_delay,
        }
    }

    /// Show `notice` in the message region.
    pub fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// The message region's content.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.form.is_loading()
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = field;
        match field {
            Field::Username => {
                self.username.focus();
                self.password.blur();
            }
            Field::Password => {
                self.password.focus();
                self.username.blur();
            }
        }
    }

    fn toggle_focus(&mut self) {
        self.set_focus(match self.focus {
            Field::Username => Field::Password,
            Field::Password => Field::Username,
        });
    }

    fn submit(&mut self) -> Option<Cmd> {
        if self.redirecting {
            return None;
        }
        self.form.username = self.username.value();
        self.form.password = self.password.value();

        match self.form.begin_submit() {
            Ok(credentials) => {
                self.notice = None;
                info!(username = %credentials.username, "login submitted");
                let auth = Arc::clone(&self.auth);
                Some(Cmd::new(move || {
                    LoginMsg::Finished(auth.authenticate(&credentials)).into_message()
                }))
            }
            // The control is disabled while loading; the keypress is dropped.
            Err(LoginError::InProgress) => None,
            Err(e) => {
                self.notice = Some(Notice::error(e.user_message()));
                let field = match e {
                    LoginError::Validation(ValidationError::EmptyPassword) => Field::Password,
                    _ => Field::Username,
                };
                self.set_focus(field);
                None
            }
        }
    }

    fn finished(&mut self, result: Result<Identity, LoginError>) -> Option<Cmd> {
        self.form.finish();
        match result {
            Ok(identity) => {
                let welcome = identity.welcome();
                if let Err(e) = self.gate.login(&Session::from(identity)) {
                    warn!(error = %e, "could not persist session");
                    self.notice = Some(Notice::error(format!("Could not save your session: {e}")));
                    return None;
                }
                self.notice = Some(Notice::success(welcome));
                self.redirecting = true;
                Some(tick(self.redirect_delay, |_| {
                    AppMsg::Navigate(Surface::Recipes).into_message()
                }))
            }
            Err(e) => {
                warn!(error = %e, "login failed");
                self.notice = Some(Notice::error(e.user_message()));
                None
            }
        }
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        match key.key_type {
            KeyType::Esc => Some(quit()),
            KeyType::Tab | KeyType::ShiftTab | KeyType::Up | KeyType::Down => {
                self.toggle_focus();
                None
            }
            KeyType::Enter => self.submit(),
            _ => {
                if self.form.is_loading() {
                    return None;
                }
                match self.focus {
                    Field::Username => self.username.handle_key(key),
                    Field::Password => self.password.handle_key(key),
                };
                None
            }
        }
    }
}

impl PageModel for LoginPage {
    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }
        match msg.downcast::<LoginMsg>()? {
            LoginMsg::Finished(result) => self.finished(result),
        }
    }

    fn view(&self, width: usize, height: usize, theme: &Theme) -> String {
        let box_width = width.min(spacing::MAX_CONTENT_WIDTH / 3 * 2).max(width.min(24));
        let field_width = box_width.saturating_sub(4 + 11);

        let button = if self.form.is_loading() {
            theme.muted_style().render(&format!("[ {} ]", self.form.button_label()))
        } else {
            theme.control_style().render(&format!("[ {} ]", self.form.button_label()))
        };

        let mut lines = vec![
            self.username.view(theme, field_width),
            self.password.view(theme, field_width),
            String::new(),
            button,
        ];
        if let Some(notice) = &self.notice {
            lines.push(String::new());
            for line in crate::components::wrap(&notice.text, box_width.saturating_sub(4)) {
                lines.push(Notice { text: line, ..notice.clone() }.render(theme));
            }
        }

        let mut out = vec![
            center(&theme.title_style().render("Welcome to Recipe Book"), width),
            center(&theme.muted_style().render("Log in to browse recipes"), width),
            String::new(),
        ];
        let pad = " ".repeat(width.saturating_sub(box_width) / 2);
        for line in boxed(theme, &lines, box_width, Some("Login"), true) {
            out.push(format!("{pad}{line}"));
        }

        let top = height.saturating_sub(out.len()) / 3;
        let mut screen = vec![String::new(); top];
        screen.extend(out);
        screen.join("\n")
    }

    fn surface(&self) -> Surface {
        Surface::Login
    }

    fn hints(&self) -> &'static str {
        "Tab switch field  Enter log in  Esc quit"
    }

    fn on_enter(&mut self) -> Option<Cmd> {
        self.redirecting = false;
        self.form.finish();
        self.password.reset();
        self.set_focus(Field::Username);
        None
    }

    fn on_leave(&mut self) {
        self.notice = None;
        self.password.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use recipes_core::{Credentials, MemorySessionStore};

    #[derive(Default)]
    struct StubAuth {
        calls: Mutex<usize>,
    }

    impl Authenticator for StubAuth {
        fn authenticate(&self, credentials: &Credentials) -> Result<Identity, LoginError> {
            *self.calls.lock() += 1;
            if credentials.username == "emilys" {
                Ok(Identity {
                    first_name: "Emily".into(),
                    token: None,
                })
            } else {
                Err(LoginError::UnknownUser)
            }
        }
    }

    fn page() -> (LoginPage, Arc<StubAuth>, SessionGate<dyn SessionStore>) {
        let auth = Arc::new(StubAuth::default());
        let store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let gate = SessionGate::new(store);
        let mut page = LoginPage::new(auth.clone(), gate.clone(), Duration::ZERO);
        page.on_enter();
        (page, auth, gate)
    }

    fn type_into(page: &mut LoginPage, text: &str) {
        page.update(Message::new(KeyMsg::paste(text)));
    }

    fn run(page: &mut LoginPage, cmd: Option<Cmd>) -> Option<Message> {
        let msg = cmd?.execute()?;
        if msg.is::<LoginMsg>() {
            let next = page.update(msg);
            return next.and_then(Cmd::execute);
        }
        Some(msg)
    }

    #[test]
    fn empty_password_is_reported_without_a_request() {
        let (mut page, auth, gate) = page();
        type_into(&mut page, "emilys");
        let cmd = page.update(Message::new(KeyMsg::from_type(KeyType::Enter)));
        assert!(cmd.is_none());
        assert_eq!(*auth.calls.lock(), 0);
        assert_eq!(page.notice().map(|n| n.text.as_str()), Some("Password must not be empty."));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn success_persists_and_redirects() {
        let (mut page, auth, gate) = page();
        type_into(&mut page, "emilys");
        page.update(Message::new(KeyMsg::from_type(KeyType::Tab)));
        type_into(&mut page, "pw");

        let cmd = page.update(Message::new(KeyMsg::from_type(KeyType::Enter)));
        assert!(page.is_loading());
        assert!(page.view(60, 20, &Theme::plain()).contains("Logging in..."));

        let next = run(&mut page, cmd).and_then(|m| m.downcast::<AppMsg>());
        assert_eq!(next, Some(AppMsg::Navigate(Surface::Recipes)));
        assert_eq!(*auth.calls.lock(), 1);
        assert!(!page.is_loading());
        assert_eq!(gate.session().map(|s| s.first_name), Some("Emily".to_string()));
        assert_eq!(
            page.notice().map(|n| n.text.as_str()),
            Some("Login successful. Welcome, Emily!")
        );
    }

    #[test]
    fn failure_reenables_and_persists_nothing() {
        let (mut page, _auth, gate) = page();
        type_into(&mut page, "nobody");
        page.update(Message::new(KeyMsg::from_type(KeyType::Tab)));
        type_into(&mut page, "pw");
        let cmd = page.update(Message::new(KeyMsg::from_type(KeyType::Enter)));
        assert!(run(&mut page, cmd).is_none());
        assert!(!page.is_loading());
        assert!(!gate.is_authenticated());
        assert!(page.view(60, 20, &Theme::plain()).contains("[ Login ]"));
    }

    #[test]
    fn second_enter_while_loading_is_ignored() {
        let (mut page, _auth, _gate) = page();
        type_into(&mut page, "emilys");
        page.update(Message::new(KeyMsg::from_type(KeyType::Tab)));
        type_into(&mut page, "pw");
        let first = page.update(Message::new(KeyMsg::from_type(KeyType::Enter)));
        let second = page.update(Message::new(KeyMsg::from_type(KeyType::Enter)));
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn pasted_newline_does_not_submit() {
        let (mut page, auth, gate) = page();
        let cmd = page.update(Message::new(KeyMsg::paste("emilys\n")));
        assert!(cmd.is_none());
        assert!(!page.is_loading());
        assert_eq!(*auth.calls.lock(), 0);
        assert!(page.notice().is_none());
        assert!(!gate.is_authenticated());
        let view = page.view(60, 20, &Theme::plain());
        assert!(view.contains("emilys"));
    }

    #[test]
    fn password_never_rendered() {
        let (mut page, _auth, _gate) = page();
        page.update(Message::new(KeyMsg::from_type(KeyType::Tab)));
        type_into(&mut page, "hunter2");
        let view = page.view(60, 20, &Theme::plain());
        assert!(!view.contains("hunter2"));
        assert!(view.contains("•••••••"));
    }
}
