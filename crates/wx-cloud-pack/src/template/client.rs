//! Client module template
//!
//! Renders a TypeScript module with one typed `wx.cloud.callFunction` wrapper
//! per function. Wrapper signatures are taken from the function modules
//! themselves through `import type`, so the client stays in sync with the
//! cloud side without duplicating types.

use super::{object_literal, params_literal, DONT_EDIT_TEXT};
use crate::naming::{cloud_name, upper_first};
use crate::registry::FunctionDescriptor;

const PROMISE_TYPES: &str = "\
type PromiseType<T> = T extends Promise<infer _> ? T : Promise<T>

type PromiseReturnType<T extends (...args: any) => any> = (...args: Parameters<T>) => PromiseType<ReturnType<T>>";

/// Names derived from one function for the client module
struct ClientFunction<'a> {
    name: &'a str,
    upper_name: String,
    cloud_name: String,
    type_name: String,
    params_text: String,
    data_text: String,
    is_main: bool,
}

impl<'a> ClientFunction<'a> {
    fn new(prefix: &str, func: &'a FunctionDescriptor) -> Self {
        let upper_name = upper_first(&func.name);
        Self {
            name: &func.name,
            cloud_name: cloud_name(prefix, &func.name),
            type_name: format!("function{}", upper_name),
            params_text: params_literal(&func.params, false),
            data_text: if func.is_main {
                "data".to_string()
            } else {
                format!("data: {}", object_literal(&func.params))
            },
            is_main: func.is_main,
            upper_name,
        }
    }

    fn import_line(&self) -> String {
        let binding = if self.is_main {
            format!("{{ main as {} }}", self.type_name)
        } else {
            self.type_name.clone()
        };
        format!("import type {} from '@cloud/functions/{}'", binding, self.name)
    }

    fn wrapper(&self) -> String {
        let signature = if self.is_main {
            format!(
                "export const cloud{} = (data?: any): PromiseType<ReturnType<typeof {}>> => {{",
                self.upper_name, self.type_name
            )
        } else {
            format!(
                "export const cloud{}: PromiseReturnType<typeof {}> = {} => {{",
                self.upper_name, self.type_name, self.params_text
            )
        };
        let call = format!(
            "wx.cloud.callFunction({{ name: '{}', {} }})",
            self.cloud_name, self.data_text
        );
        format!("{}\n  return {}.then(res => res.result as any)\n}}", signature, call)
    }

    fn default_entry(&self) -> String {
        format!("  {}: cloud{}", self.name, self.upper_name)
    }
}

/// Render the client module for all registered functions
pub fn client_template(prefix: &str, functions: &[FunctionDescriptor]) -> String {
    let fns: Vec<_> = functions.iter().map(|f| ClientFunction::new(prefix, f)).collect();

    let mut sections = Vec::new();

    let mut header = vec![DONT_EDIT_TEXT.to_string()];
    header.extend(fns.iter().map(ClientFunction::import_line));
    sections.push(header.join("\n"));

    sections.push(PROMISE_TYPES.to_string());

    if !fns.is_empty() {
        let wrappers: Vec<_> = fns.iter().map(ClientFunction::wrapper).collect();
        sections.push(wrappers.join("\n\n"));
    }

    let entries: Vec<_> = fns.iter().map(ClientFunction::default_entry).collect();
    if entries.is_empty() {
        sections.push("export default {}".to_string());
    } else {
        sections.push(format!("export default {{\n{}\n}}", entries.join(",\n")));
    }

    sections.join("\n\n")
}
