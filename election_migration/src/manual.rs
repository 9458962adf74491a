/*!

This is the long-form manual for `election_migration` and `agora-migrate`.

## Moving an election

An election is moved in two steps. `create` reads the election from the
source deployment and creates it again on the destination:

```bash
agora-migrate create 1017
```

The body sent to the destination is printed first, then the raw answer of the
destination. The `id`, `layout`, `title`, `description` and `questions` of the
source election are copied without any change. The director and the
authorities come from the settings, and both dates are set to
`2016-01-05T11:11:11.111`.

Once voting is over, `tally` stops the election on the destination, which
starts the tally:

```bash
agora-migrate tally 1017
```

Running `create` twice for the same election sends the same requests twice.
Whether the second one is accepted is up to the destination.

## Settings

Without settings, the source is `https://agora/elections-old/api/election`
and the destination is `https://agora/elections/api/election`, with director
`auth1` and the single authority `auth2`. A JSON file passed with `--config`
overrides any of these:

```json
{
  "baseDomain": "vote.example.org",
  "destinationBaseUrl": "https://new.example.org/elections/api/election",
  "director": "auth1",
  "authorities": ["auth2", "auth3"],
  "acceptInvalidCerts": false
}
```

`baseDomain` sets both URLs to the standard layout of that domain; the
explicit URLs take precedence over it. `--domain` on the command line takes
precedence over the file.

## TLS

Certificates are verified. Deployments running with self-signed certificates
need `--insecure` (or `"acceptInvalidCerts": true`), which turns off all
verification for both deployments.

## Errors

The status code of an answer is logged but not interpreted: a `500` from
the destination is printed like any other answer and the program exits with
`0`. The program exits with `1` when a call cannot complete, when the source
does not answer with JSON, or when the source election lacks one of the
copied fields. In the last two cases nothing is sent to the destination.

Set `RUST_LOG=debug` or pass `--verbose` to see every request.

*/
