use libc::{c_char, c_double, c_int, size_t};

use crate::calculator::Calculator;

const FFI_OK: c_int = 0;
const FFI_ERROR: c_int = -1;

/// Copies `message` into `buffer` as a NUL-terminated string, truncating it to fit.
unsafe fn fill_buffer(buffer: *mut c_char, buffer_len: size_t, message: &str) {
    if buffer.is_null() || buffer_len == 0 {
        return;
    }

    let buffer = std::slice::from_raw_parts_mut(buffer as *mut u8, buffer_len);
    let len = message.len().min(buffer_len - 1);
    buffer[..len].copy_from_slice(&message.as_bytes()[..len]);
    buffer[len] = 0;
}

/// Borrows the C string `input` as UTF-8, reporting failures into the error buffer.
unsafe fn read_input<'a>(
    input: *const c_char,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> Option<&'a str> {
    if input.is_null() {
        fill_buffer(output_error, output_error_len, "Invalid input string pointer!");
        return None;
    }

    match std::ffi::CStr::from_ptr(input).to_str() {
        Ok(input) => Some(input),
        Err(_) => {
            fill_buffer(
                output_error,
                output_error_len,
                "Failed to convert the input string to a Rust string!",
            );
            None
        }
    }
}

/// Evaluate an infix expression.
///
/// # Arguments
///
/// * `input` - The NUL-terminated expression to evaluate.
/// * `output_result` - Where the result is stored on success.
/// * `output_error` - The buffer to write the error message to.
/// * `output_error_len` - The length of the error buffer.
///
/// # Returns
///
/// `0` on success, `-1` if the expression could not be evaluated. On failure the
/// error buffer holds a NUL-terminated message and `output_result` is untouched.
///
/// # Safety
///
/// `input` must be null or a valid NUL-terminated string. `output_result` must be
/// null or valid for writes. `output_error` must be null or valid for
/// `output_error_len` bytes.
#[no_mangle]
pub unsafe extern "C" fn expr_evaluate(
    input: *const c_char,
    output_result: *mut c_double,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> c_int {
    let Some(input) = read_input(input, output_error, output_error_len) else {
        return FFI_ERROR;
    };

    if output_result.is_null() {
        fill_buffer(output_error, output_error_len, "Invalid result pointer!");
        return FFI_ERROR;
    }

    match Calculator::default().evaluate(input) {
        Ok(result) => {
            *output_result = result;
            FFI_OK
        }
        Err(e) => {
            fill_buffer(output_error, output_error_len, &e.to_string());
            FFI_ERROR
        }
    }
}

/// Convert an infix expression to its space-joined postfix form.
///
/// # Arguments
///
/// * `input` - The NUL-terminated expression to convert.
/// * `output` - The buffer to write the postfix expression to.
/// * `output_len` - The length of the output buffer.
/// * `output_error` - The buffer to write the error message to.
/// * `output_error_len` - The length of the error buffer.
///
/// # Returns
///
/// `0` on success, `-1` on failure. A postfix form that does not fit into
/// `output` is a failure, never a silently truncated result.
///
/// # Safety
///
/// `input` must be null or a valid NUL-terminated string. `output` must be null or
/// valid for `output_len` bytes, and likewise `output_error` for `output_error_len`.
#[no_mangle]
pub unsafe extern "C" fn expr_to_postfix(
    input: *const c_char,
    output: *mut c_char,
    output_len: size_t,
    output_error: *mut c_char,
    output_error_len: size_t,
) -> c_int {
    let Some(input) = read_input(input, output_error, output_error_len) else {
        return FFI_ERROR;
    };

    let postfix = match Calculator::default().to_postfix(input) {
        Ok(postfix) => postfix,
        Err(e) => {
            fill_buffer(output_error, output_error_len, &e.to_string());
            return FFI_ERROR;
        }
    };

    if output.is_null() || postfix.len() >= output_len {
        fill_buffer(
            output_error,
            output_error_len,
            &format!("Output buffer too small, {} bytes needed", postfix.len() + 1),
        );
        return FFI_ERROR;
    }

    fill_buffer(output, output_len, &postfix);
    FFI_OK
}
