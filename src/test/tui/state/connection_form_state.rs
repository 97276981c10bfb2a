use super::{ConnectionField, ConnectionForm};
use secrecy::ExposeSecret;

fn form() -> ConnectionForm {
    ConnectionForm::new("localhost", "5432", "", "postgres")
}

#[test]
fn tab_traversal_wraps_in_both_directions() {
    let mut field = ConnectionField::Host;
    for _ in 0..ConnectionField::ALL.len() {
        field = field.next();
    }
    assert_eq!(field, ConnectionField::Host);
    assert_eq!(ConnectionField::Host.prev(), ConnectionField::Database);
}

#[test]
fn arrow_focus_stops_at_the_ends() {
    let mut form = form();
    form.focus_up();
    assert_eq!(form.selected, ConnectionField::Host);

    for _ in 0..10 {
        form.focus_down();
    }
    assert_eq!(form.selected, ConnectionField::Database);
}

#[test]
fn edits_apply_to_focused_field_and_clear_error() {
    let mut form = form();
    form.selected = ConnectionField::User;
    form.error = Some("Failed to connect".to_string());

    form.insert_char('b');
    form.insert_char('k');
    assert_eq!(form.user, "bk");
    assert!(form.error.is_none());

    form.backspace();
    assert_eq!(form.user, "b");

    form.selected = ConnectionField::Host;
    form.clear_field();
    assert_eq!(form.host, "");
    assert_eq!(form.user, "b");
}

#[test]
fn password_is_masked_for_display() {
    let mut form = form();
    form.selected = ConnectionField::Password;
    for ch in "s3cr3t".chars() {
        form.insert_char(ch);
    }

    assert_eq!(form.display_value(ConnectionField::Password), "******");
    assert_eq!(form.display_value(ConnectionField::Host), "localhost");
}

#[test]
fn descriptor_trims_fields_but_keeps_password_verbatim() {
    let mut form = ConnectionForm::new(" db.internal ", " 6432", " backup ", " inventory ");
    form.selected = ConnectionField::Password;
    form.insert_char(' ');
    form.insert_char('x');

    let conn = form.to_descriptor();
    assert_eq!(conn.host, "db.internal");
    assert_eq!(conn.port, "6432");
    assert_eq!(conn.user, "backup");
    assert_eq!(conn.database, "inventory");
    assert_eq!(conn.password.expose_secret(), " x");
}
