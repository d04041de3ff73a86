//! Price formatting commands.

use anyhow::{anyhow, Result};
use handyman_cart::format::{calculate_discount, convert_price, format_compact, format_price_range, parse_price};
use handyman_cart::money::{Currency, Money};
use serde_json::json;

use super::{FormatArgs, FormatCommand};
use crate::context::Context;

/// Run the format command.
pub fn run(args: FormatArgs, ctx: &Context) -> Result<()> {
    match args.command {
        FormatCommand::Price {
            amount,
            currency,
            compact,
        } => {
            let money = Money::from_decimal(amount, currency_arg(&currency, ctx));
            let text = if compact {
                format_compact(&money)
            } else {
                money.display()
            };
            print_value(ctx, "Price", &text, json!({ "money": money, "formatted": text }));
        }
        FormatCommand::Range { min, max, currency } => {
            let currency = currency_arg(&currency, ctx);
            let text = format_price_range(
                &Money::from_decimal(min, currency),
                &Money::from_decimal(max, currency),
            );
            print_value(ctx, "Range", &text, json!({ "formatted": text }));
        }
        FormatCommand::Discount {
            amount,
            percent,
            currency,
        } => {
            let discount = calculate_discount(Money::from_decimal(amount, currency_arg(&currency, ctx)), percent);
            if ctx.output.is_json() {
                ctx.output.json(&discount);
            } else {
                ctx.output.kv("Original", &discount.original_price.display());
                ctx.output.kv("Discount", &discount.percent_label());
                ctx.output.kv("Savings", &discount.savings().display());
                ctx.output.kv("Final", &discount.final_price.display());
            }
        }
        FormatCommand::Convert {
            amount,
            from,
            to,
            rate,
        } => {
            let source = Money::from_decimal(amount, currency_arg(&from, ctx));
            let converted = convert_price(&source, currency_arg(&to, ctx), rate);
            let text = converted.display();
            print_value(ctx, "Converted", &text, json!({ "money": converted, "formatted": text }));
        }
        FormatCommand::Parse { input, currency } => {
            let currency = currency_arg(&currency, ctx);
            let money = parse_price(&input, currency)
                .ok_or_else(|| anyhow!("Could not parse '{}' as a {} price", input, currency.code()))?;
            print_value(
                ctx,
                "Amount",
                &format!("{}", money.to_decimal()),
                json!({ "money": money, "value": money.to_decimal() }),
            );
        }
        FormatCommand::Currencies => {
            if ctx.output.is_json() {
                let list: Vec<_> = Currency::ALL
                    .iter()
                    .map(|c| json!({ "code": c.code(), "symbol": c.symbol(), "locale": c.locale() }))
                    .collect();
                ctx.output.json(&list);
            } else {
                for c in Currency::ALL {
                    ctx.output.list_item(&format!("{} {} ({})", c.code(), c.symbol(), c.locale()));
                }
            }
        }
    }

    Ok(())
}

fn currency_arg(code: &str, ctx: &Context) -> Currency {
    if !Currency::is_supported(code) {
        ctx.output.warn(&format!("Unsupported currency '{}', using COP", code));
    }
    Currency::from_code_or_default(code)
}

fn print_value(ctx: &Context, label: &str, text: &str, value: serde_json::Value) {
    if ctx.output.is_json() {
        ctx.output.json(&value);
    } else {
        ctx.output.kv(label, text);
    }
}
