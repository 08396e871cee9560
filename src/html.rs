use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Where the htmx script is loaded from.
pub const HTMX_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";

/// Where the htmx extension for `hx-target-error` is loaded from.
pub const HTMX_RESPONSE_TARGETS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/htmx-ext-response-targets@2.0.4/dist/response-targets.min.js";

/// Where the Tailwind CSS browser build is loaded from, it generates the styles
/// for the classes used on the page.
pub const TAILWIND_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4.1.13";

/// Where the ECharts script is loaded from.
pub const ECHARTS_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Card styles
pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 rounded-lg shadow \
    border border-gray-200 dark:border-gray-700 p-6";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Badge styles
pub const INCOME_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-green-800 bg-green-100 rounded-full \
    dark:bg-green-900 dark:text-green-300";

pub const EXPENSE_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-red-800 bg-red-100 rounded-full \
    dark:bg-red-900 dark:text-red-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "w-full max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6 md:py-8 text-gray-900 dark:text-white";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
    Style(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Ledgerlite" }
                script src=(TAILWIND_SCRIPT_URL) {}

                script src=(HTMX_SCRIPT_URL) {}
                script src=(HTMX_RESPONSE_TARGETS_SCRIPT_URL) {}

                style
                {
                    r#"
                    #indicator.htmx-indicator {
                        display: none;
                    }

                    #indicator.htmx-request .htmx-indicator {
                        display: inline;
                    }

                    #indicator.htmx-request.htmx-indicator {
                        display: inline;
                    }
                    "#
                }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                        HeadElement::Style(text) => style { (text) }
                    }
                }
            }

            body class="min-h-screen bg-gray-50 dark:bg-gray-900" hx-ext="response-targets"
            {
                (content)

                // Alert container for out-of-band swaps
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Homepage"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

pub fn loading_spinner() -> Markup {
    // Spinner SVG adapted from https://flowbite.com/docs/components/spinner/
    html! {
        svg
            aria-hidden="true"
            role="status"
            class="inline text-white w-4 h-4 me-2 mb-1 animate-spin"
            viewBox="0 0 100 101"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        {
            path
                d="M100 50.5908C100 78.2051 77.6142 100.591 50 100.591C22.3858 100.591 0 78.2051 0 50.5908C0 22.9766 22.3858 0.59082 50 0.59082C77.6142 0.59082 100 22.9766 100 50.5908ZM9.08144 50.5908C9.08144 73.1895 27.4013 91.5094 50 91.5094C72.5987 91.5094 90.9186 73.1895 90.9186 50.5908C90.9186 27.9921 72.5987 9.67226 50 9.67226C27.4013 9.67226 9.08144 27.9921 9.08144 50.5908Z"
                fill="#E5E7EB" {}
            path
                d="M93.9676 39.0409C96.393 38.4038 97.8624 35.9116 97.0079 33.5539C95.2932 28.8227 92.871 24.3692 89.8167 20.348C85.8452 15.1192 80.8826 10.7238 75.2124 7.41289C69.5422 4.10194 63.2754 1.94025 56.7698 1.05124C51.7666 0.367541 46.6976 0.446843 41.7345 1.27873C39.2613 1.69328 37.813 4.19778 38.4501 6.62326C39.0873 9.04874 41.5694 10.4717 44.0505 10.1071C47.8511 9.54855 51.7191 9.52689 55.5402 10.0491C60.8642 10.7766 65.9928 12.5457 70.6331 15.2552C75.2735 17.9648 79.3347 21.5619 82.5849 25.841C84.9175 28.9121 86.7997 32.2913 88.1811 35.8758C89.083 38.2158 91.5421 39.6781 93.9676 39.0409Z"
                fill="currentColor" {}
        }
    }
}

/// Returns the CSS styles for adding a dollar sign prefix to number inputs.
pub fn dollar_input_styles() -> HeadElement {
    HeadElement::Style(PreEscaped(
        r#"
        .input-wrapper {
            position: relative;
            display: block;
        }
        .input-wrapper input[type="number"] {
            padding-left: 1.4rem;
        }
        .input-wrapper::before {
            content: '$';
            position: absolute;
            left: 0.6rem;
            top: 50%;
            transform: translateY(-50%);
            pointer-events: none;
        }
        "#
        .to_owned(),
    ))
}

/// Format `number` as dollars and cents with thousands separators, e.g. "-$1,234.50".
pub fn format_currency(number: f64) -> String {
    static DOLLARS_FMT: OnceLock<Formatter> = OnceLock::new();

    let dollars_fmt = DOLLARS_FMT.get_or_init(|| {
        Formatter::new()
            .separator(',')
            .unwrap_or_default()
            .precision(Precision::Decimals(0))
    });

    let cents = (number.abs() * 100.0).round() as u64;
    let sign = if number < 0.0 && cents > 0 { "-" } else { "" };
    let dollars = match cents / 100 {
        // Zero is hardcoded as "0" by numfmt, which is what we want here.
        0 => "0".to_owned(),
        dollars => dollars_fmt.fmt_string(dollars as f64),
    };

    format!("{sign}${dollars}.{:02}", cents % 100)
}

/// Format `amount` with an explicit sign, e.g. "+$12.00" or "-$3.50".
pub fn format_signed_currency(amount: f64) -> String {
    let formatted = format_currency(amount.abs());

    if amount >= 0.0 {
        format!("+{formatted}")
    } else {
        format!("-{formatted}")
    }
}
