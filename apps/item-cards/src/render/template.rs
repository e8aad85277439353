// Built-in Handlebars template for printed item cards.
// A4 landscape, no margins; each batch becomes one `.page` section and its
// cards share the page on a 2×2 grid sized by their size class.
//
// Context: `batches[]` with `pattern`, `slug` and `cards[]`; every card carries
// its record fields, `sizeClass`, a joined `meta` line and `paragraphs`
// (description paragraphs split into lines).

pub const DEFAULT_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Item Cards</title>
<style>
  @page { size: A4 landscape; margin: 0; }
  html, body { margin: 0; padding: 0; }
  body { font-family: "Georgia", serif; font-size: 9pt; }
  .page {
    width: 297mm;
    height: 210mm;
    box-sizing: border-box;
    padding: 6mm;
    display: grid;
    grid-template-columns: 1fr 1fr;
    grid-template-rows: 1fr 1fr;
    gap: 4mm;
    page-break-after: always;
    break-after: page;
  }
  .page:last-child { page-break-after: auto; break-after: auto; }
  .card { border: 0.4mm solid #333; border-radius: 2mm; padding: 3mm; overflow: hidden; }
  .card-size-1 { grid-row: span 2; }
  .card-size-2 { grid-row: span 2; }
  .card-size-3 { grid-column: span 2; grid-row: span 2; }
  .card header { display: flex; justify-content: space-between; align-items: baseline; }
  .card h2 { font-size: 11pt; margin: 0; }
  .card .number { font-family: monospace; color: #666; }
  .card .meta { font-style: italic; margin: 1mm 0 2mm; }
  .card .description p { margin: 0 0 1.5mm; }
</style>
</head>
<body>
{{#each batches}}
<section class="page page-{{slug}}">
{{#each cards}}
<article class="card card-size-{{sizeClass}}">
<header><h2>{{name}}</h2><span class="number">{{number}}</span></header>
{{#if meta}}<p class="meta">{{meta}}</p>{{/if}}
<div class="description">
{{#each paragraphs}}<p>{{#each this}}{{#unless @first}}<br>{{/unless}}{{this}}{{/each}}</p>
{{/each}}
</div>
</article>
{{/each}}
</section>
{{/each}}
</body>
</html>
"#;
