//! OGC WMS 1.3.0 service exception reports.

use quick_xml::escape::escape;

use gpf_common::GpfError;

/// Render a `ServiceExceptionReport` with a single exception.
pub fn wms_exception_xml(code: &str, message: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<ServiceExceptionReport version="1.3.0" xmlns="http://www.opengis.net/ogc">"#,
            r#"<ServiceException code="{}">{}</ServiceException>"#,
            r#"</ServiceExceptionReport>"#
        ),
        escape(code),
        escape(message)
    )
}

/// Render an error as a service exception report.
pub fn error_to_exception_xml(err: &GpfError) -> String {
    wms_exception_xml(err.wms_exception_code(), &err.to_string())
}
