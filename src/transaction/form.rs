//! The form for adding a transaction: its fields, its data and its validation.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Error, endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner},
    transaction::core::{NewTransaction, TransactionType},
};

/// The form data for creating a transaction.
///
/// Every field is optional at this point so that missing values can be
/// reported with a friendly alert instead of a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
    /// The value of the transaction in dollars, as typed by the user.
    #[serde(default)]
    pub amount: String,
    /// Whether money was earned or spent, defaults to an expense.
    #[serde(default, rename = "type")]
    pub transaction_type: Option<TransactionType>,
    /// The category of the transaction.
    #[serde(default)]
    pub category: String,
    /// The date when the transaction occurred, defaults to today.
    #[serde(default)]
    pub date: Option<Date>,
}

impl TransactionForm {
    /// Check the form and convert it into a [NewTransaction].
    ///
    /// `today` is used when the form has no date.
    ///
    /// # Errors
    /// Returns [Error::MissingFields] if the description, amount or category is
    /// empty, or [Error::InvalidAmount] if the amount is not a positive number.
    pub fn validate(self, today: Date) -> Result<NewTransaction, Error> {
        let description = self.description.trim();
        let amount = self.amount.trim();
        let category = self.category.trim();

        if description.is_empty() || amount.is_empty() || category.is_empty() {
            return Err(Error::MissingFields);
        }

        let parsed_amount = match amount.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => value,
            _ => return Err(Error::InvalidAmount(amount.to_owned())),
        };

        Ok(NewTransaction {
            description: description.to_owned(),
            amount: parsed_amount,
            transaction_type: self.transaction_type.unwrap_or(TransactionType::Expense),
            category: category.to_owned(),
            date: self.date.unwrap_or(today),
        })
    }
}

/// The values the form starts with.
pub struct TransactionFormDefaults<'a> {
    /// The type selected initially.
    pub transaction_type: TransactionType,
    /// The category selected initially, the first category when `None`.
    pub category: Option<&'a str>,
    /// The initial date, usually today.
    pub date: Date,
}

/// Render the add transaction form, posting to [endpoints::TRANSACTIONS_API].
///
/// `categories` fill the category select; the first one is selected unless
/// the defaults name another.
pub fn add_transaction_form(
    defaults: &TransactionFormDefaults<'_>,
    categories: &[String],
) -> Markup {
    let selected_category = defaults
        .category
        .or_else(|| categories.first().map(String::as_str))
        .unwrap_or("Other");

    html! {
        form
            id="add-transaction-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            hx-on::after-request="if (event.detail.successful) { this.reset(); this.closest('details')?.removeAttribute('open'); }"
            hx-disabled-elt="find button[type=submit]"
            class="space-y-5"
        {
            h2 class="text-xl font-bold" { "Add New Transaction" }
            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Record a new income or expense transaction"
            }

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="e.g., Coffee, Salary, Rent"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div class="grid grid-cols-2 gap-4"
            {
                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                    select name="type" id="type" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for transaction_type in [TransactionType::Income, TransactionType::Expense] {
                            option
                                value=(transaction_type.as_str())
                                selected[transaction_type == defaults.transaction_type]
                            {
                                (transaction_type.label())
                            }
                        }
                    }
                }
            }

            div class="grid grid-cols-2 gap-4"
            {
                div
                {
                    label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                    select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in categories {
                            option value=(category) selected[category == selected_category]
                            {
                                (category)
                            }
                        }
                    }
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(defaults.date)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            div class="flex justify-end pt-2"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE)
                {
                    span id="indicator" class="inline htmx-indicator" { (loading_spinner()) }
                    "Add Transaction"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error, endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, must_get_form,
        },
        transaction::{
            NewTransaction, TransactionType,
            form::{TransactionForm, TransactionFormDefaults, add_transaction_form},
        },
    };

    const TODAY: time::Date = date!(2025 - 06 - 15);

    fn valid_form() -> TransactionForm {
        TransactionForm {
            description: "Coffee".to_owned(),
            amount: "4.50".to_owned(),
            transaction_type: Some(TransactionType::Expense),
            category: "Groceries".to_owned(),
            date: Some(date!(2025 - 06 - 01)),
        }
    }

    #[test]
    fn valid_form_becomes_new_transaction() {
        let got = valid_form().validate(TODAY);

        assert_eq!(
            got,
            Ok(NewTransaction {
                description: "Coffee".to_owned(),
                amount: 4.5,
                transaction_type: TransactionType::Expense,
                category: "Groceries".to_owned(),
                date: date!(2025 - 06 - 01),
            })
        );
    }

    #[test]
    fn empty_description_is_rejected() {
        let form = TransactionForm {
            description: "   ".to_owned(),
            ..valid_form()
        };

        assert_eq!(form.validate(TODAY), Err(Error::MissingFields));
    }

    #[test]
    fn empty_amount_or_category_is_rejected() {
        let no_amount = TransactionForm {
            amount: String::new(),
            ..valid_form()
        };
        let no_category = TransactionForm {
            category: String::new(),
            ..valid_form()
        };

        assert_eq!(no_amount.validate(TODAY), Err(Error::MissingFields));
        assert_eq!(no_category.validate(TODAY), Err(Error::MissingFields));
    }

    #[test]
    fn amount_must_be_positive_number() {
        for amount in ["abc", "0", "-5", "NaN", "inf"] {
            let form = TransactionForm {
                amount: amount.to_owned(),
                ..valid_form()
            };

            assert_eq!(
                form.validate(TODAY),
                Err(Error::InvalidAmount(amount.to_owned())),
                "amount {amount:?} should be rejected"
            );
        }
    }

    #[test]
    fn missing_type_and_date_use_defaults() {
        let form = TransactionForm {
            transaction_type: None,
            date: None,
            ..valid_form()
        };

        let got = form.validate(TODAY).unwrap();

        assert_eq!(got.transaction_type, TransactionType::Expense);
        assert_eq!(got.date, TODAY);
    }

    #[test]
    fn decodes_url_encoded_form() {
        let form: TransactionForm = serde_html_form::from_str(
            "description=Salary&amount=3000&type=income&category=Work&date=2025-06-01",
        )
        .unwrap();

        assert_eq!(form.transaction_type, Some(TransactionType::Income));
        assert_eq!(form.date, Some(date!(2025 - 06 - 01)));
        assert_eq!(form.amount, "3000");
    }

    #[test]
    fn form_posts_to_transactions_api() {
        let categories = vec!["Groceries".to_owned(), "Utilities".to_owned()];
        let markup = add_transaction_form(
            &TransactionFormDefaults {
                transaction_type: TransactionType::Expense,
                category: None,
                date: TODAY,
            },
            &categories,
        );
        let document = Html::parse_fragment(&markup.into_string());
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "description", "text");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "date", "date");
        assert_form_submit_button_with_text(&form, "Add Transaction");

        let selected = Selector::parse("select[name=category] option[selected]").unwrap();
        let selected: Vec<_> = form
            .select(&selected)
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(selected, ["Groceries"]);

        let selected_type = Selector::parse("select[name=type] option[selected]").unwrap();
        let selected_type: Vec<_> = form
            .select(&selected_type)
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(selected_type, ["expense"]);
    }
}
