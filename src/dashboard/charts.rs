//! Chart generation and rendering for the dashboard.
//!
//! The expense breakdown is drawn as an ECharts pie. The chart options are
//! generated with `charming` and initialised by an inline script placed right
//! after the chart container, so that the chart also renders when the
//! dashboard content is swapped in by htmx.

use charming::{
    Chart,
    component::Legend,
    element::{Color, JsFunction, Label, Tooltip, Trigger},
    series::Pie,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{CategoryTotal, expenses_by_category},
    html::CARD_STYLE,
    transaction::Transaction,
};

/// The colours of the pie slices, reused in order when there are more categories.
pub(super) const SLICE_COLORS: [&str; 8] = [
    "#10b981", "#3b82f6", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#6366f1",
];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the expense breakdown card for `transactions`.
///
/// Shows an empty state instead of a chart when there are no expenses.
pub(super) fn expense_breakdown_view(transactions: &[Transaction]) -> Markup {
    let totals = expenses_by_category(transactions);

    let chart = (!totals.is_empty()).then(|| DashboardChart {
        id: "expenses-chart",
        options: escape_script_text(&expenses_pie_chart(&totals).to_string()),
    });

    html!(
        section id="expense-breakdown" class=(CARD_STYLE)
        {
            h3 class="text-lg font-semibold" { "Expense Breakdown" }
            p class="text-sm text-gray-500 dark:text-gray-400 mt-1" { "Distribution by category" }

            @match chart {
                Some(chart) => (chart_view(&chart)),
                None => {
                    div class="flex justify-center items-center h-64 text-gray-500 dark:text-gray-400"
                    {
                        p { "No expense data available" }
                    }
                }
            }
        }
    )
}

/// Renders the container for `chart` followed by the script that draws it.
fn chart_view(chart: &DashboardChart) -> Markup {
    html!(
        div id=(chart.id) class="min-h-[400px] w-full" {}
        script { (chart_script(chart)) }
    )
}

/// Escape `text` so that it cannot close the `<script>` element it is placed
/// in, or open a comment there.
///
/// Inside JavaScript string literals `<\/` and `<\!` read the same as `</`
/// and `<!`.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Generates JavaScript initialization code for a dashboard chart.
///
/// The chart follows the dark mode preference and resizes with the window.
fn chart_script(chart: &DashboardChart) -> PreEscaped<String> {
    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        chart.id, chart.options
    ))
}

/// A pie chart with one slice per category, labelled with the category name
/// and its rounded share of the total.
pub(super) fn expenses_pie_chart(totals: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = totals
        .iter()
        .map(|total| (total.total, total.category.as_str()))
        .collect();

    Chart::new()
        .color(SLICE_COLORS.iter().map(|color| Color::from(*color)).collect())
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom(0))
        .series(
            Pie::new()
                .name("Expenses")
                .radius("60%")
                .label(Label::new().show(true).formatter(slice_label_formatter()))
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

#[inline]
fn slice_label_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "params",
        "return params.name + ' ' + Math.round(params.percent) + '%';",
    )
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        dashboard::{
            aggregation::expenses_by_category,
            charts::{escape_script_text, expense_breakdown_view, expenses_pie_chart},
        },
        transaction::{Transaction, TransactionType},
    };

    fn transaction(amount: f64, transaction_type: TransactionType, category: &str) -> Transaction {
        Transaction {
            id: 1,
            description: "test".to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
            date: date!(2025 - 01 - 01),
        }
    }

    #[test]
    fn renders_chart_container_for_expenses() {
        let transactions = [transaction(20.0, TransactionType::Expense, "Groceries")];

        let html = Html::parse_fragment(&expense_breakdown_view(&transactions).into_string());

        let chart = Selector::parse("#expenses-chart").unwrap();
        assert!(html.select(&chart).next().is_some());
        assert!(!html.html().contains("No expense data available"));
    }

    #[test]
    fn renders_empty_state_without_expenses() {
        let transactions = [transaction(20.0, TransactionType::Income, "Work")];

        let html = Html::parse_fragment(&expense_breakdown_view(&transactions).into_string());

        let chart = Selector::parse("#expenses-chart").unwrap();
        assert!(html.select(&chart).next().is_none());
        assert!(html.html().contains("No expense data available"));
    }

    #[test]
    fn chart_options_include_categories_and_palette() {
        let transactions = [
            transaction(200.0, TransactionType::Expense, "Groceries"),
            transaction(50.0, TransactionType::Expense, "Transport"),
        ];

        let options = expenses_pie_chart(&expenses_by_category(&transactions)).to_string();

        assert!(options.contains("\"pie\""));
        assert!(options.contains("Groceries"));
        assert!(options.contains("Transport"));
        assert!(options.contains("#10b981"));
    }

    #[test]
    fn category_cannot_close_the_chart_script() {
        let transactions = [transaction(
            20.0,
            TransactionType::Expense,
            "</script><script>alert(1)</script>",
        )];

        let markup = expense_breakdown_view(&transactions).into_string();
        let html = Html::parse_fragment(&markup);

        assert!(
            !markup.contains("</script><script>alert(1)"),
            "category ended the chart script early: {markup}"
        );
        let scripts = Selector::parse("script").unwrap();
        assert_eq!(html.select(&scripts).count(), 1);
        assert!(html.select(&Selector::parse("#expenses-chart").unwrap()).next().is_some());
    }

    #[test]
    fn escapes_closing_tags_and_comment_openers() {
        assert_eq!(escape_script_text("a</b"), "a<\\/b");
        assert_eq!(escape_script_text("<!-- x"), "<\\!-- x");
        assert_eq!(escape_script_text("Food & Drink"), "Food & Drink");
    }
}
