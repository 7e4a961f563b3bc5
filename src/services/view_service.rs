use tera::{Context, Tera};

use crate::models::payment::PaymentResult;

const CREATE_PAYMENT_TEMPLATE: &str = "create-payment-api.html";

/// Renders the create-payment page, with or without a payment result.
pub struct ViewService {
    tera: Tera,
    form_action: String,
}

impl ViewService {
    pub fn new(form_action: impl Into<String>) -> Result<Self, tera::Error> {
        Self::with_template(
            form_action,
            include_str!("../../templates/create-payment-api.html"),
        )
    }

    pub(crate) fn with_template(
        form_action: impl Into<String>,
        template: &str,
    ) -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(CREATE_PAYMENT_TEMPLATE, template)?;

        Ok(Self {
            tera,
            form_action: form_action.into(),
        })
    }

    pub fn render_create_payment(
        &self,
        payment_result: Option<&PaymentResult>,
    ) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("form_action", &self.form_action);
        if let Some(result) = payment_result {
            context.insert("payment_result", result);
        }

        self.tera.render(CREATE_PAYMENT_TEMPLATE, &context)
    }
}
