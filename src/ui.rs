//! Swagger UI templates, parameterized only by the version segment of the
//! served document URL.

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <title>Swagger UI</title>
    <link rel="stylesheet" type="text/css" href="/swagger/swagger-ui.css" />
    <link rel="stylesheet" type="text/css" href="/swagger/index.css" />
    <link rel="icon" type="image/png" href="/swagger/favicon-32x32.png" sizes="32x32" />
    <link rel="icon" type="image/png" href="/swagger/favicon-16x16.png" sizes="16x16" />
    <script src="https://unpkg.com/react@15/dist/react.min.js"></script>
  </head>

  <body>
    <div id="swagger-ui"></div>
    <script src="/swagger/swagger-ui-bundle.js" charset="UTF-8"> </script>
    <script src="/swagger/swagger-ui-standalone-preset.js" charset="UTF-8"> </script>
    <script src="/{version}/swagger-initializer.js" charset="UTF-8"> </script>
  </body>
</html>
"#;

// Augments the authorize padlock with the scope list of the current
// operation's security requirement.
const INITIALIZER_TEMPLATE: &str = r#"window.onload = function() {
  const h = React.createElement

  window.ui = SwaggerUIBundle({
    url: "/{version}/swagger.json",
    dom_id: '#swagger-ui',
    deepLinking: true,
    presets: [
      SwaggerUIBundle.presets.apis,
      SwaggerUIStandalonePreset,
      system => {
        // Capture the security prop of OperationSummary, then pass it
        // to authorizeOperationBtn
        let currentSecurity
        return {
            wrapComponents: {
                OperationSummary: Original => props => {
                    const security = props.operationProps.get('security')
                    currentSecurity = security.toJS()
                    return h(Original, props)
                },
                authorizeOperationBtn: Original =>
                    function (props) {
                        return h('div', {}, [
                            ...(currentSecurity || []).map(scheme => {
                                const schemeName = Object.keys(scheme)[0]
                                if (!scheme[schemeName].length) return null

                                const scopes = scheme[schemeName].flatMap(scope => [
                                    h('code', null, scope),
                                    ', ',
                                ])
                                scopes.pop()
                                return h('span', null, [schemeName, '(', ...scopes, ')'])
                            }),
                            h(Original, props),
                        ])
                    },
            },
        }
    },
    ],
    plugins: [
      SwaggerUIBundle.plugins.DownloadUrl
    ],
    layout: "StandaloneLayout"
  });
};
"#;

/// The UI shell page for one version.
pub(crate) fn page(version: &str) -> String {
    PAGE_TEMPLATE.replace("{version}", version)
}

/// The UI bootstrap script for one version.
pub(crate) fn initializer(version: &str) -> String {
    INITIALIZER_TEMPLATE.replace("{version}", version)
}
