//! Text normalization for method labels and block conditions.

use ferry_core::model::MessageArgument;

/// Name used for calls whose name is missing or empty.
pub const CALL_PLACEHOLDER: &str = "message";

/// Name used for returns whose name is missing or empty.
pub const RETURN_PLACEHOLDER: &str = "return";

/// Else-branch label reported for every alternative block.
pub const ELSE_TEXT: &str = "else";

/// Formats a call label as `name(arg[:type][=default][, ...], ...)[:returnType]`.
///
/// A missing or empty name becomes [`CALL_PLACEHOLDER`]. Each argument
/// renders its name, then `:type` and `=default` when present and non-empty;
/// a variadic argument is followed by a literal `, ...`. The return suffix is
/// omitted when the type is missing or empty.
///
/// # Examples
///
/// ```
/// use ferry::input::format_method_text;
/// use ferry_core::model::MessageArgument;
///
/// let args = [MessageArgument::new("name").with_data_type("string")];
/// assert_eq!(format_method_text(Some("login"), &args, None), "login(name:string)");
/// assert_eq!(format_method_text(Some("ping"), &[], None), "ping()");
/// assert_eq!(format_method_text(None, &[], Some("bool")), "message():bool");
/// ```
pub fn format_method_text(
    name: Option<&str>,
    arguments: &[MessageArgument],
    return_type: Option<&str>,
) -> String {
    let name = non_empty(name).unwrap_or(CALL_PLACEHOLDER);

    let arguments = arguments
        .iter()
        .map(format_argument)
        .collect::<Vec<_>>()
        .join(", ");

    match non_empty(return_type) {
        Some(return_type) => format!("{name}({arguments}):{return_type}"),
        None => format!("{name}({arguments})"),
    }
}

/// Formats a return label; returns never carry arguments or a return type.
pub fn format_return_text(return_name: Option<&str>) -> String {
    let name = non_empty(return_name).unwrap_or(RETURN_PLACEHOLDER);
    format!("{name}()")
}

fn format_argument(argument: &MessageArgument) -> String {
    let mut text = argument.name().unwrap_or_default().to_owned();
    if let Some(data_type) = non_empty(argument.data_type()) {
        text.push(':');
        text.push_str(data_type);
    }
    if let Some(default) = non_empty(argument.initialized_to()) {
        text.push('=');
        text.push_str(default);
    }
    if argument.var_args() {
        text.push_str(", ...");
    }
    text
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_call() {
        assert_eq!(format_method_text(Some("name"), &[], None), "name()");
    }

    #[test]
    fn test_missing_or_empty_name_uses_placeholder() {
        assert_eq!(format_method_text(Some(""), &[], None), "message()");
        assert_eq!(format_method_text(None, &[], None), "message()");
    }

    #[test]
    fn test_empty_return_type_is_omitted() {
        assert_eq!(format_method_text(Some("run"), &[], Some("")), "run()");
        assert_eq!(format_method_text(Some("run"), &[], Some("int")), "run():int");
    }

    #[test]
    fn test_full_argument_rendering() {
        let args = [
            MessageArgument::new("user").with_data_type("User"),
            MessageArgument::new("retries")
                .with_data_type("int")
                .with_initialized_to("3"),
            MessageArgument::new("flags").with_var_args(),
        ];

        assert_eq!(
            format_method_text(Some("connect"), &args, Some("Session")),
            "connect(user:User, retries:int=3, flags, ...):Session"
        );
    }

    #[test]
    fn test_argument_without_name_keeps_type() {
        let args = [MessageArgument::default().with_data_type("int")];
        assert_eq!(format_method_text(Some("f"), &args, None), "f(:int)");
    }

    #[test]
    fn test_empty_type_and_default_are_skipped() {
        let args = [MessageArgument::new("x")
            .with_data_type("")
            .with_initialized_to("")];
        assert_eq!(format_method_text(Some("f"), &args, None), "f(x)");
    }

    #[test]
    fn test_return_text() {
        assert_eq!(format_return_text(Some("token")), "token()");
        assert_eq!(format_return_text(None), "return()");
        assert_eq!(format_return_text(Some("")), "return()");
    }
}
